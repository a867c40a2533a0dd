//! Settings-to-signer integration tests.

#[cfg(test)]
mod tests {
    use azconfig_auth::RequestSigner;
    use azconfig_core::{AppConfigError, AppConfigSettings};

    use crate::{TEST_CONNECTION_STRING, init_tracing};

    #[test]
    fn test_should_build_signer_from_settings() {
        init_tracing();
        let settings = AppConfigSettings::from_connection_string(TEST_CONNECTION_STRING).unwrap();
        let signer = RequestSigner::from_settings(&settings);

        let request = signer.prepare().unwrap();
        assert_eq!(request.url(), "https://myconfig.azconfig.io/kv?api-version=1");
        assert!(
            request
                .header("authorization")
                .unwrap()
                .starts_with("HMAC-SHA256 Credential=abc&")
        );
    }

    #[test]
    fn test_should_surface_bad_secret_as_configuration_error() {
        init_tracing();
        let signer = RequestSigner::from_connection_string(
            "Endpoint=https://myconfig.azconfig.io;Id=abc;Secret=not*base64",
        )
        .unwrap();

        let err = signer.prepare().unwrap_err();
        assert!(matches!(err, AppConfigError::InvalidSecret(_)));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_should_reject_insecure_connection_string() {
        init_tracing();
        let err = RequestSigner::from_connection_string("Endpoint=http://x.io;Id=a;Secret=Zm9v")
            .unwrap_err();
        assert!(matches!(err, AppConfigError::InvalidEndpoint(_)));
    }
}
