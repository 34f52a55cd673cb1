use crate::body::RequestBody;
use crate::decode::ResponseShape;
use crate::endpoint::Query;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::types::{Configuration, DeleteConfigurationResponse, ListConfigurationsResponse};

use super::{require, Call, DiscoveryClient, Operation};

const CONFIGURATIONS: &[&str] = &["v1/environments", "configurations"];

#[derive(Debug, Clone, Default)]
pub struct CreateConfigurationOptions {
    pub environment_id: String,
    pub configuration: Configuration,
    pub headers: Vec<(String, String)>,
}

impl CreateConfigurationOptions {
    pub fn new(environment_id: impl Into<String>, configuration: Configuration) -> Self {
        Self {
            environment_id: environment_id.into(),
            configuration,
            headers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListConfigurationsOptions {
    pub environment_id: String,
    pub name: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl ListConfigurationsOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetConfigurationOptions {
    pub environment_id: String,
    pub configuration_id: String,
    pub headers: Vec<(String, String)>,
}

impl GetConfigurationOptions {
    pub fn new(environment_id: impl Into<String>, configuration_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            configuration_id: configuration_id.into(),
            headers: Vec::new(),
        }
    }
}

pub type DeleteConfigurationOptions = GetConfigurationOptions;

/// Replaces the whole configuration; fields left unset are cleared.
#[derive(Debug, Clone, Default)]
pub struct UpdateConfigurationOptions {
    pub environment_id: String,
    pub configuration_id: String,
    pub configuration: Configuration,
    pub headers: Vec<(String, String)>,
}

impl DiscoveryClient {
    pub fn create_configuration(
        &self,
        options: &CreateConfigurationOptions,
    ) -> Result<Operation<Configuration>> {
        require("environment_id", &options.environment_id)?;
        require("name", &options.configuration.name)?;
        let call = Call::new(HttpMethod::Post, CONFIGURATIONS)
            .params(&[options.environment_id.as_str()])
            .body(RequestBody::json(&options.configuration)?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn list_configurations(
        &self,
        options: &ListConfigurationsOptions,
    ) -> Result<Operation<ListConfigurationsResponse>> {
        require("environment_id", &options.environment_id)?;
        let mut query = Query::new();
        query.push_opt("name", options.name.as_ref());
        let call = Call::new(HttpMethod::Get, CONFIGURATIONS)
            .params(&[options.environment_id.as_str()])
            .query(query)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn get_configuration(&self, options: &GetConfigurationOptions) -> Result<Operation<Configuration>> {
        require("environment_id", &options.environment_id)?;
        require("configuration_id", &options.configuration_id)?;
        let call = Call::new(HttpMethod::Get, CONFIGURATIONS)
            .params(&[options.environment_id.as_str(), options.configuration_id.as_str()])
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn update_configuration(
        &self,
        options: &UpdateConfigurationOptions,
    ) -> Result<Operation<Configuration>> {
        require("environment_id", &options.environment_id)?;
        require("configuration_id", &options.configuration_id)?;
        require("name", &options.configuration.name)?;
        let call = Call::new(HttpMethod::Put, CONFIGURATIONS)
            .params(&[options.environment_id.as_str(), options.configuration_id.as_str()])
            .body(RequestBody::json(&options.configuration)?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn delete_configuration(
        &self,
        options: &DeleteConfigurationOptions,
    ) -> Result<Operation<DeleteConfigurationResponse>> {
        require("environment_id", &options.environment_id)?;
        require("configuration_id", &options.configuration_id)?;
        let call = Call::new(HttpMethod::Delete, CONFIGURATIONS)
            .params(&[options.environment_id.as_str(), options.configuration_id.as_str()])
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }
}
