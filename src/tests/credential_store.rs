#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::Duration;

    use crate::error::{CredentialError, Stage};
    use crate::store::{CredentialRecord, CredentialStore};
    use crate::tests::common::{fixed_now, write_file};

    fn record(user_token: Option<&str>) -> CredentialRecord {
        let created_at = fixed_now();
        CredentialRecord {
            developer_token: "eyJhbGciOiJFUzI1NiJ9.e30.sig".to_owned(),
            user_token: user_token.map(str::to_owned),
            expires_at: created_at + Duration::days(180),
            created_at,
        }
    }

    #[test]
    fn save_then_load_round_trips_with_and_without_user_token() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CredentialStore::new(dir.path().join("tokens.json"));

        for original in [record(None), record(Some("test-user-token"))] {
            store.save(&original).expect("save");
            let loaded = store.load().expect("load");
            assert_eq!(loaded, original);
        }
    }

    #[test]
    fn persisted_layout_uses_snake_case_fields_and_omits_absent_user_token() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CredentialStore::new(dir.path().join("tokens.json"));
        store.save(&record(None)).expect("save");

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).expect("read")).expect("json");
        let obj = raw.as_object().expect("object");
        assert!(obj.contains_key("developer_token"));
        assert!(obj.contains_key("expires_at"));
        assert!(obj.contains_key("created_at"));
        assert!(!obj.contains_key("user_token"));
        assert_eq!(obj["created_at"], "2024-01-15T12:30:00Z");
    }

    #[test]
    fn load_of_never_written_location_is_no_credential() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CredentialStore::new(dir.path().join("missing").join("tokens.json"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, CredentialError::NoCredential { .. }), "got {:?}", err);
        assert!(err.requires_authentication());
        assert_eq!(err.stage(), Stage::StorageRead);
        assert!(!store.exists());
    }

    #[test]
    fn unparsable_bytes_are_corrupt_credential() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cases: [&[u8]; 4] = [
            &[0x00, 0xff, 0x13, 0x37],
            b"{ not json",
            br#"{"developer_token": "abc"}"#,
            b"",
        ];

        for bytes in cases {
            let path = write_file(dir.path(), "tokens.json", bytes);
            let err = CredentialStore::new(path).load().unwrap_err();
            assert!(matches!(err, CredentialError::CorruptCredential { .. }), "got {:?}", err);
            assert!(!err.requires_authentication());
        }
    }

    #[test]
    fn records_violating_invariants_are_corrupt() {
        let dir = tempfile::tempdir().expect("tempdir");

        let inverted = r#"{
  "developer_token": "abc",
  "expires_at": "2024-01-01T00:00:00Z",
  "created_at": "2024-06-01T00:00:00Z"
}"#;
        let empty_token = r#"{
  "developer_token": "",
  "expires_at": "2024-06-01T00:00:00Z",
  "created_at": "2024-01-01T00:00:00Z"
}"#;

        for content in [inverted, empty_token] {
            let path = write_file(dir.path(), "tokens.json", content);
            let err = CredentialStore::new(path).load().unwrap_err();
            assert!(matches!(err, CredentialError::CorruptCredential { .. }), "got {:?}", err);
        }
    }

    #[test]
    fn empty_user_token_reads_as_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(
            dir.path(),
            "tokens.json",
            r#"{
  "developer_token": "abc",
  "user_token": "",
  "expires_at": "2024-06-01T00:00:00Z",
  "created_at": "2024-01-01T00:00:00Z"
}"#,
        );

        let loaded = CredentialStore::new(path).load().expect("load");
        assert_eq!(loaded.user_token, None);
        assert!(!loaded.has_user_token());
    }

    #[test]
    fn save_replaces_record_wholesale_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CredentialStore::new(dir.path().join("tokens.json"));

        store.save(&record(Some("user"))).expect("first save");
        let mut second = record(None);
        second.developer_token = "second-token".to_owned();
        store.save(&second).expect("second save");

        assert_eq!(store.load().expect("load"), second);

        let entries: Vec<_> = fs::read_dir(dir.path()).expect("read_dir").collect();
        assert_eq!(entries.len(), 1, "only the credential file should remain");
    }

    #[cfg(unix)]
    #[test]
    fn created_directory_and_file_are_owner_only() {
        use crate::tests::common::mode_of;

        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("share").join("catalog-token-agent");
        let store = CredentialStore::new(nested.join("data.db"));
        store.save(&record(None)).expect("save");

        assert_eq!(mode_of(store.path()), 0o600, "credential file must be 0600");
        assert_eq!(mode_of(&nested), 0o700, "created directory must be 0700");
    }

    #[test]
    fn parent_that_is_a_file_is_storage_write_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = write_file(dir.path(), "blocker", "x");
        let store = CredentialStore::new(blocker.join("tokens.json"));

        let err = store.save(&record(None)).unwrap_err();
        assert!(matches!(err, CredentialError::StorageWrite { .. }), "got {:?}", err);
        assert_eq!(err.stage(), Stage::StorageWrite);
    }

    #[cfg(unix)]
    #[test]
    fn storage_directory_is_synced_after_replace() {
        use crate::store::credential_store::sync_dir;

        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("fresh");
        let store = CredentialStore::new(nested.join("tokens.json"));
        store.save(&record(None)).expect("save into new directory");

        sync_dir(&nested).expect("existing directory syncs");
        assert!(sync_dir(&dir.path().join("gone")).is_err());
        assert_eq!(store.load().expect("load"), record(None));
    }
}
