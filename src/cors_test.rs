use super::*;
use crate::allowed_headers::AllowedHeaders;
use crate::constants::header;
use crate::origin::Origin;
use crate::result::BoxError;

fn request(
    method: &'static str,
    origin: Option<&'static str>,
    acrm: Option<&'static str>,
    acrh: Option<&'static str>,
) -> RequestContext<'static> {
    RequestContext {
        method,
        origin,
        access_control_request_method: acrm,
        access_control_request_headers: acrh,
    }
}

fn cors_with(options: CorsOptions) -> Cors {
    Cors::new(options).expect("valid CORS configuration")
}

mod new {
    use super::*;

    #[test]
    fn when_options_valid_should_keep_them() {
        // Arrange
        let options = CorsOptions::new().max_age(30);

        // Act
        let cors = Cors::new(options).expect("valid CORS configuration");

        // Assert
        assert_eq!(cors.options().max_age, Some(30));
    }

    #[test]
    fn when_options_invalid_should_return_validation_error() {
        // Arrange
        let options = CorsOptions::new().options_success_status(500);

        // Act
        let result = Cors::new(options);

        // Assert
        assert!(matches!(
            result,
            Err(ValidationError::InvalidSuccessStatus(500))
        ));
    }
}

mod check {
    use super::*;

    #[tokio::test]
    async fn when_preflight_request_should_return_preflight_decision() {
        // Arrange
        let cors = cors_with(CorsOptions::default());
        let request = request("OPTIONS", Some("https://allowed.test"), Some("GET"), Some("X-Test"));

        // Act
        let decision = cors.check(&request).await.expect("cors evaluation succeeded");

        // Assert
        match decision {
            CorsDecision::Preflight(result) => {
                assert_eq!(
                    result.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(String::as_str),
                    Some("*")
                );
                assert_eq!(
                    result.headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).map(String::as_str),
                    Some("GET,HEAD,PUT,POST,DELETE")
                );
                assert_eq!(
                    result.headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).map(String::as_str),
                    Some("X-Test")
                );
                assert_eq!(result.status, 204);
            }
            other => panic!("expected preflight decision, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn when_simple_request_should_return_simple_decision() {
        // Arrange
        let cors = cors_with(CorsOptions::default());
        let request = request("GET", None, None, None);

        // Act
        let decision = cors.check(&request).await.expect("cors evaluation succeeded");

        // Assert
        match decision {
            CorsDecision::Simple(result) => {
                assert_eq!(
                    result.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(String::as_str),
                    Some("*")
                );
                assert!(!result.headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
            }
            other => panic!("expected simple decision, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn when_options_without_request_method_should_treat_as_simple() {
        // Arrange
        let cors = cors_with(CorsOptions::new().max_age(60));
        let request = request("OPTIONS", Some("https://a.test"), None, Some("X-Foo"));

        // Act
        let decision = cors.check(&request).await.expect("cors evaluation succeeded");

        // Assert
        assert!(!decision.is_short_circuit());
        let headers = decision.into_headers();
        assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
        assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
        assert!(!headers.contains_key(header::ACCESS_CONTROL_MAX_AGE));
    }

    #[tokio::test]
    async fn when_origin_disabled_should_return_not_applicable_for_every_method() {
        // Arrange
        let cors = cors_with(CorsOptions::new().origin(false).credentials(true));

        // Act
        let simple = cors
            .check(&request("GET", Some("https://a.test"), None, None))
            .await
            .expect("cors evaluation succeeded");
        let preflight = cors
            .check(&request("OPTIONS", Some("https://a.test"), Some("PUT"), None))
            .await
            .expect("cors evaluation succeeded");

        // Assert
        assert_eq!(simple, CorsDecision::NotApplicable);
        assert_eq!(preflight, CorsDecision::NotApplicable);
    }

    #[tokio::test]
    async fn when_mirror_without_origin_should_still_emit_common_headers() {
        // Arrange
        let cors = cors_with(
            CorsOptions::new()
                .origin(true)
                .credentials(true)
                .exposed_headers("X-Trace"),
        );

        // Act
        let decision = cors
            .check(&request("GET", None, None, None))
            .await
            .expect("cors evaluation succeeded");

        // Assert
        let headers = decision.into_headers();
        assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).map(String::as_str),
            Some("true")
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_EXPOSE_HEADERS).map(String::as_str),
            Some("X-Trace")
        );
    }

    #[tokio::test]
    async fn when_preflight_should_emit_headers_in_stable_order() {
        // Arrange
        let cors = cors_with(
            CorsOptions::new()
                .origin("https://static.test")
                .credentials(true)
                .exposed_headers(["X-A", "X-B"])
                .allowed_headers(AllowedHeaders::list(["Content-Type"]))
                .max_age(10),
        );

        // Act
        let decision = cors
            .check(&request("OPTIONS", Some("https://other.test"), Some("POST"), None))
            .await
            .expect("cors evaluation succeeded");

        // Assert
        let names: Vec<_> = decision.into_headers().into_iter().collect();
        assert_eq!(
            names,
            vec![
                (header::ACCESS_CONTROL_ALLOW_ORIGIN.to_string(), "https://static.test".to_string()),
                (header::ACCESS_CONTROL_ALLOW_CREDENTIALS.to_string(), "true".to_string()),
                (header::ACCESS_CONTROL_EXPOSE_HEADERS.to_string(), "X-A,X-B".to_string()),
                (header::ACCESS_CONTROL_ALLOW_METHODS.to_string(), "GET,HEAD,PUT,POST,DELETE".to_string()),
                (header::ACCESS_CONTROL_ALLOW_HEADERS.to_string(), "Content-Type".to_string()),
                (header::ACCESS_CONTROL_MAX_AGE.to_string(), "10".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn when_custom_success_status_should_use_it_on_preflight() {
        // Arrange
        let cors = cors_with(CorsOptions::new().options_success_status(200));

        // Act
        let decision = cors
            .check(&request("OPTIONS", Some("https://a.test"), Some("GET"), None))
            .await
            .expect("cors evaluation succeeded");

        // Assert
        assert_eq!(decision.status(), Some(200));
    }

    #[tokio::test]
    async fn when_origin_callback_fails_should_propagate_error() {
        // Arrange
        let cors = cors_with(CorsOptions::new().origin(Origin::computed_async(|_| {
            Box::pin(async { Err::<OriginDecision, BoxError>("registry down".into()) })
        })));

        // Act
        let result = cors
            .check(&request("GET", Some("https://a.test"), None, None))
            .await;

        // Assert
        assert!(matches!(result, Err(CorsError::OriginCallback(_))));
    }
}
