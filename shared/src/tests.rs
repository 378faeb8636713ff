#[cfg(test)]
mod tests {
    use std::net::IpAddr;
    use crate::catalog::{Catalog, CatalogError, DEFAULT_LATEST_COMIC};
    use crate::models::{ComicEntry, Database, Strip, VoteRecord};
    use crate::requester::{resolve_identity, IdentitySource, RequesterIdentity};
    use crate::validation::{num_pages, page_range, validate_page, ValidationError};

    fn entry(id: u32, published: bool) -> ComicEntry {
        ComicEntry { published, ..ComicEntry::numbered(id) }
    }

    fn ip(s: &str) -> Option<IpAddr> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_vote_record_counts_each_identity_once() {
        let mut record = VoteRecord::default();
        assert!(record.add_vote("1.2.3.4"));
        assert!(!record.add_vote("1.2.3.4"));
        assert!(record.add_vote("5.6.7.8"));

        assert_eq!(record.likes(), 2);
        assert!(record.has_voted("1.2.3.4"));
        assert!(record.is_consistent());
        assert_eq!(record.voters().collect::<Vec<_>>(), vec!["1.2.3.4", "5.6.7.8"]);
    }

    #[test]
    fn test_retract_restores_previous_state() {
        let mut record = VoteRecord::default();
        record.add_vote("1.2.3.4");
        assert!(record.retract_vote("1.2.3.4"));
        assert!(!record.retract_vote("1.2.3.4"));
        assert!(record.is_empty());
    }

    #[test]
    fn test_database_file_shape() {
        let mut db = Database::default();
        db.likes.entry(5).or_default().add_vote("1.2.3.4");

        let json = serde_json::to_value(&db).unwrap();
        assert_eq!(json, serde_json::json!({
            "likes": { "5": { "likes": 1, "votes": ["1.2.3.4"] } }
        }));
    }

    #[test]
    fn test_database_tolerates_missing_keys() {
        let db: Database = serde_json::from_str("{}").unwrap();
        assert!(db.likes.is_empty());

        let db: Database = serde_json::from_str(r#"{"likes": {"3": {}}}"#).unwrap();
        assert_eq!(db.likes_for(3), 0);
        assert_eq!(db.first_inconsistent(), None);
    }

    #[test]
    fn test_database_detects_count_mismatch() {
        let db: Database = serde_json::from_str(
            r#"{"likes": {"2": {"likes": 3, "votes": ["a"]}, "7": {"likes": 1, "votes": ["b"]}}}"#
        ).unwrap();
        assert_eq!(db.first_inconsistent(), Some(2));
        assert_eq!(db.total_likes(), 4);
    }

    #[test]
    fn test_database_rejects_non_numeric_ids() {
        assert!(serde_json::from_str::<Database>(r#"{"likes": {"abc": {}}}"#).is_err());
        assert!(serde_json::from_str::<Database>("[]").is_err());
        assert!(serde_json::from_str::<Database>("[{}]").is_err());
        assert!(serde_json::from_str::<Database>(r#"{"likes": []}"#).is_err());
    }

    #[test]
    fn test_sequential_catalog() {
        let catalog = Catalog::sequential(24);
        assert_eq!(catalog.len(), 24);
        assert_eq!(catalog.latest_id(), 24);
        assert_eq!(catalog.lookup(5).unwrap().file_name, "comic-005.png");
        assert!(catalog.lookup(0).is_none());
        assert!(catalog.lookup(999).is_none());

        let ids = catalog.all_ids_newest_first();
        assert_eq!(ids.first(), Some(&24));
        assert_eq!(ids.last(), Some(&1));
    }

    #[test]
    fn test_unpublished_entries_are_hidden() {
        let catalog = Catalog::from_entries([entry(1, true), entry(2, false), entry(3, true)]).unwrap();
        assert!(catalog.lookup(2).is_none());
        assert_eq!(catalog.latest_id(), 3);
        assert_eq!(catalog.all_ids_newest_first(), vec![3, 1]);
    }

    #[test]
    fn test_latest_follows_catalog_order() {
        let catalog = Catalog::from_entries([entry(7, true), entry(3, true)]).unwrap();
        assert_eq!(catalog.latest_id(), 3);
    }

    #[test]
    fn test_empty_catalog_falls_back() {
        let catalog = Catalog::from_entries([entry(1, false)]).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.latest_id(), DEFAULT_LATEST_COMIC);
        assert!(catalog.all_ids_newest_first().is_empty());
    }

    #[test]
    fn test_catalog_rejects_bad_ids() {
        assert!(matches!(
            Catalog::from_entries([entry(1, true), entry(1, false)]),
            Err(CatalogError::DuplicateId(1))
        ));
        assert!(matches!(Catalog::from_entries([entry(0, true)]), Err(CatalogError::ZeroId)));
    }

    #[test]
    fn test_catalog_entry_json() {
        let entries: Vec<ComicEntry> = serde_json::from_str(r#"[
            {"id": 1, "fileName": "first.png", "title": "Hello", "postedAt": "2024-03-01T12:00:00Z"},
            {"id": 2, "fileName": "draft.png", "published": false}
        ]"#).unwrap();
        assert!(entries[0].published);
        assert!(entries[0].posted_at.is_some());

        let catalog = Catalog::from_entries(entries).unwrap();
        let strip = Strip::new(catalog.lookup(1).unwrap(), 4);
        assert_eq!(strip.url, "/static/comics/first.png");
        assert_eq!(strip.likes, 4);
        assert_eq!(strip.title.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_pagination() {
        assert_eq!(num_pages(24, 10), Ok(3));
        assert_eq!(num_pages(20, 10), Ok(2));
        assert_eq!(num_pages(0, 10), Ok(0));
        assert_eq!(num_pages(5, 0), Err(ValidationError::ZeroPageSize));

        assert_eq!(page_range(1, 10, 24), Ok(0..10));
        assert_eq!(page_range(3, 10, 24), Ok(20..24));
        assert_eq!(
            page_range(4, 10, 24),
            Err(ValidationError::PageOutOfRange { page: 4, num_pages: 3 })
        );
        assert!(validate_page(0, 3).is_err());
        assert!(validate_page(1, 0).is_err());
    }

    #[test]
    fn test_identity_source_parsing() {
        assert_eq!("remote".parse(), Ok(IdentitySource::RemoteAddr));
        assert_eq!(" Forwarded ".parse(), Ok(IdentitySource::Forwarded));
        assert!("proxy".parse::<IdentitySource>().is_err());
    }

    #[test]
    fn test_remote_identity_ignores_headers() {
        let identity = resolve_identity(IdentitySource::RemoteAddr, Some("9.9.9.9"), None, ip("1.2.3.4"));
        assert_eq!(identity, Some(RequesterIdentity::new("1.2.3.4")));
        assert_eq!(resolve_identity(IdentitySource::RemoteAddr, Some("9.9.9.9"), None, None), None);
    }

    #[test]
    fn test_forwarded_identity_prefers_headers() {
        let source = IdentitySource::Forwarded;
        assert_eq!(
            resolve_identity(source, Some("9.9.9.9"), Some("8.8.8.8"), ip("1.2.3.4")).unwrap().as_str(),
            "9.9.9.9"
        );
        assert_eq!(
            resolve_identity(source, None, Some(" 8.8.8.8, 10.0.0.1"), ip("1.2.3.4")).unwrap().as_str(),
            "8.8.8.8"
        );
        assert_eq!(
            resolve_identity(source, Some(""), None, ip("1.2.3.4")).unwrap().as_str(),
            "1.2.3.4"
        );
    }
}
