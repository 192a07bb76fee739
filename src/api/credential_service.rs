//! Credential API: issuing credentials and verifying diplomas.

use serde::{Deserialize, Serialize};

use super::client::ClientFactory;
use crate::error::PortalResult;

/// Diploma details recorded with a credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiplomaMetadata {
    pub university_name: String,
    pub degree_name: String,
    pub issue_date: String,
    #[serde(default)]
    pub expiry_date: String,
}

/// A credential as stored on the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: String,
    /// Hex SHA-256 of the diploma file, see [`crate::utils::file_hash`].
    pub diploma_hash: String,
    pub graduate_public_key: String,
    pub issuer_signature: String,
    pub issuer_public_key: String,
    pub diploma_metadata: DiplomaMetadata,
    pub status: String,
    pub credential_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashVerification {
    pub diploma_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureVerification {
    pub diploma_hash: String,
    pub issuer_signature: String,
    pub issuer_public_key: String,
}

/// Outcome of a verification call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub credential: Option<Credential>,
}

#[derive(Clone)]
pub struct CredentialService {
    factory: ClientFactory,
}

impl CredentialService {
    pub fn new(factory: ClientFactory) -> Self {
        Self { factory }
    }

    pub async fn post_credential(&self, credential: &Credential) -> PortalResult<()> {
        let body = serde_json::to_string(credential)?;
        self.factory.api().await.post("/credential", &body).await?;
        tracing::info!(id = %credential.id, "Credential submitted");
        Ok(())
    }

    pub async fn verify_diploma_hash(
        &self,
        request: &HashVerification,
    ) -> PortalResult<VerificationResult> {
        self.factory.api().await.post_json("/verify/hash", request).await
    }

    pub async fn verify_diploma_signature(
        &self,
        request: &SignatureVerification,
    ) -> PortalResult<VerificationResult> {
        self.factory
            .api()
            .await
            .post_json("/verify/signature", request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{
        MapTranslator, MockHttpClient, MockResponse, RecordingNotifier, ReloadCounter,
    };
    use crate::adapters::InMemoryStorage;
    use crate::config::AppConfig;
    use crate::interceptors::InterceptorContext;
    use crate::session::{SessionContext, SessionStore};
    use serde_json::json;
    use std::sync::Arc;

    fn service() -> (CredentialService, MockHttpClient, RecordingNotifier) {
        let http = MockHttpClient::new();
        let notifier = RecordingNotifier::new();
        let ctx = InterceptorContext::new(
            SessionContext::new(
                SessionStore::new(Arc::new(InMemoryStorage::new())),
                Arc::new(InMemoryStorage::new()),
                Arc::new(ReloadCounter::new()),
            ),
            Arc::new(notifier.clone()),
            Arc::new(MapTranslator::new().with("errors.CREDENTIAL_EXISTS", "Already issued")),
        );
        let config = AppConfig::new().with_api_url("http://ledger.test/api");
        let factory = ClientFactory::new(config, Arc::new(http.clone()), ctx);
        (CredentialService::new(factory), http, notifier)
    }

    fn sample() -> Credential {
        Credential {
            id: "credential1".into(),
            diploma_hash: "e3b0c442".into(),
            graduate_public_key: "MIIB".into(),
            issuer_signature: "3045".into(),
            issuer_public_key: "MIIC".into(),
            diploma_metadata: DiplomaMetadata {
                university_name: "University of Latvia".into(),
                degree_name: "BSc".into(),
                issue_date: "2024-06-20".into(),
                expiry_date: String::new(),
            },
            status: "active".into(),
            credential_type: "diploma".into(),
        }
    }

    #[test]
    fn test_credential_wire_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["diplomaHash"], "e3b0c442");
        assert_eq!(value["diplomaMetadata"]["universityName"], "University of Latvia");
        assert_eq!(value["credentialType"], "diploma");
    }

    #[tokio::test]
    async fn test_post_credential() {
        let (svc, http, _) = service();
        http.set_response("http://ledger.test/api/credential", MockResponse::status(201, ""));
        svc.post_credential(&sample()).await.unwrap();

        let req = &http.get_requests()[0];
        assert_eq!(req.headers.get("X-API-Key").unwrap(), "test");
        let body: Credential = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, sample());
    }

    #[tokio::test]
    async fn test_post_credential_conflict_notifies() {
        let (svc, http, notifier) = service();
        http.set_response(
            "http://ledger.test/api/credential",
            MockResponse::json(
                422,
                json!({"errors": [{"type": "ErrExec", "message": "[err:CREDENTIAL_EXISTS] credential1 exists"}]}),
            ),
        );
        assert!(svc.post_credential(&sample()).await.is_err());
        assert_eq!(notifier.messages(), vec!["Already issued"]);
    }

    #[tokio::test]
    async fn test_verify_hash() {
        let (svc, http, _) = service();
        http.set_response(
            "http://ledger.test/api/verify/hash",
            MockResponse::json(200, json!({"valid": true})),
        );
        let result = svc
            .verify_diploma_hash(&HashVerification {
                diploma_hash: "e3b0".into(),
            })
            .await
            .unwrap();
        assert!(result.valid);
        assert!(result.credential.is_none());
        assert_eq!(
            http.get_requests()[0].body.as_deref(),
            Some(r#"{"diplomaHash":"e3b0"}"#)
        );
    }

    #[tokio::test]
    async fn test_verify_signature() {
        let (svc, http, _) = service();
        http.set_response(
            "http://ledger.test/api/verify/signature",
            MockResponse::json(200, json!({"valid": false})),
        );
        let result = svc
            .verify_diploma_signature(&SignatureVerification {
                diploma_hash: "h".into(),
                issuer_signature: "s".into(),
                issuer_public_key: "k".into(),
            })
            .await
            .unwrap();
        assert!(!result.valid);
    }
}
