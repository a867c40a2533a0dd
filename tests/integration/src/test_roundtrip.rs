//! Sign, serve, and decode round trips against the in-process store.

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use azconfig_auth::RequestSigner;
    use azconfig_model::decode_response;
    use chrono::{TimeZone, Utc};

    use crate::{FakeStore, TEST_CONNECTION_STRING, init_tracing};

    #[test]
    fn test_should_fetch_and_decode_configuration() -> Result<()> {
        init_tracing();
        let signer = RequestSigner::from_connection_string(TEST_CONNECTION_STRING)?;
        let store = FakeStore::new(
            "c2VjcmV0LWtleS1ieXRlcw==",
            &[("color", "blue"), ("size", "10"), ("color", "green")],
        );

        let request = signer.prepare()?.into_http_request();
        let body = store.handle(&request)?;
        let config = decode_response(&body)?;

        assert_eq!(config.len(), 2);
        assert_eq!(config["color"], "green");
        assert_eq!(config["size"], "10");
        Ok(())
    }

    #[test]
    fn test_should_be_rejected_by_store_with_other_secret() -> Result<()> {
        init_tracing();
        let signer = RequestSigner::from_connection_string(TEST_CONNECTION_STRING)?;
        let store = FakeStore::new("b3RoZXI=", &[("a", "1")]);

        let ts = Utc.with_ymd_and_hms(2022, 1, 11, 16, 42, 45).unwrap();
        let request = signer.prepare_at(ts)?.into_http_request();
        let err = store.handle(&request).unwrap_err();

        assert!(FakeStore::is_rejection(&err));
        Ok(())
    }

    #[test]
    fn test_should_decode_empty_store() -> Result<()> {
        init_tracing();
        let signer = RequestSigner::from_connection_string(TEST_CONNECTION_STRING)?;
        let store = FakeStore::new("c2VjcmV0LWtleS1ieXRlcw==", &[]);

        let body = store.handle(&signer.prepare()?.into_http_request())?;
        assert!(decode_response(&body)?.is_empty());
        Ok(())
    }
}
