use crate::body::RequestBody;
use crate::decode::ResponseShape;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::types::{CredentialDetails, Credentials, CredentialsList, DeleteCredentials, SourceType};

use super::{require, Call, DiscoveryClient, Operation};

const CREDENTIALS: &[&str] = &["v1/environments", "credentials"];

#[derive(Debug, Clone, Default)]
pub struct ListCredentialsOptions {
    pub environment_id: String,
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateCredentialsOptions {
    pub environment_id: String,
    pub source_type: Option<SourceType>,
    pub credential_details: Option<CredentialDetails>,
    pub status: Option<String>,
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct CredentialsOptions {
    pub environment_id: String,
    pub credential_id: String,
    pub headers: Vec<(String, String)>,
}

impl CredentialsOptions {
    pub fn new(environment_id: impl Into<String>, credential_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            credential_id: credential_id.into(),
            headers: Vec::new(),
        }
    }

    fn ids(&self) -> Result<[&str; 2]> {
        require("environment_id", &self.environment_id)?;
        require("credential_id", &self.credential_id)?;
        Ok([self.environment_id.as_str(), self.credential_id.as_str()])
    }
}

impl DiscoveryClient {
    pub fn list_credentials(&self, options: &ListCredentialsOptions) -> Result<Operation<CredentialsList>> {
        require("environment_id", &options.environment_id)?;
        let call = Call::new(HttpMethod::Get, CREDENTIALS)
            .params(&[options.environment_id.as_str()])
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn create_credentials(&self, options: &CreateCredentialsOptions) -> Result<Operation<Credentials>> {
        require("environment_id", &options.environment_id)?;
        let body = Credentials {
            credential_id: None,
            source_type: options.source_type,
            credential_details: options.credential_details.clone(),
            status: options.status.clone(),
        };
        let call = Call::new(HttpMethod::Post, CREDENTIALS)
            .params(&[options.environment_id.as_str()])
            .body(RequestBody::json(&body)?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn get_credentials(&self, options: &CredentialsOptions) -> Result<Operation<Credentials>> {
        let call = Call::new(HttpMethod::Get, CREDENTIALS)
            .params(&options.ids()?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn delete_credentials(&self, options: &CredentialsOptions) -> Result<Operation<DeleteCredentials>> {
        let call = Call::new(HttpMethod::Delete, CREDENTIALS)
            .params(&options.ids()?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::client;

    #[test]
    fn create_credentials_body() {
        let options = CreateCredentialsOptions {
            environment_id: "env1".into(),
            source_type: Some(SourceType::Salesforce),
            credential_details: Some(CredentialDetails {
                credential_type: Some("username_password".into()),
                url: Some("https://login.salesforce.com".into()),
                username: Some("me".into()),
                password: Some("pw".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let op = client().create_credentials(&options).unwrap();
        assert_eq!(op.request.url, "https://x/api/v1/environments/env1/credentials?version=2018-03-05");
        let body: serde_json::Value = serde_json::from_slice(op.request.body.as_ref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "source_type": "salesforce",
                "credential_details": {
                    "credential_type": "username_password",
                    "url": "https://login.salesforce.com",
                    "username": "me",
                    "password": "pw"
                }
            })
        );
    }

    #[test]
    fn credentials_by_id() {
        let options = CredentialsOptions::new("env1", "cred1");
        let op = client().get_credentials(&options).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/environments/env1/credentials/cred1?version=2018-03-05"
        );
        let op = client().delete_credentials(&options).unwrap();
        assert_eq!(op.request.method, HttpMethod::Delete);
    }
}
