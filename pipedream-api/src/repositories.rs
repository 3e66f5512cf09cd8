use crate::endpoints::{
    ComponentType,
    accounts::{DeleteAccount, DeleteAppAccounts, GetAccount, ListAccounts},
    components::{ConfigureComponent, GetComponent, ListComponents, ReloadComponentProps},
    events::{DeleteSourceEvents, ListSourceEvents},
    sources::{CreateSource, DeleteSource, UpdateSource},
    triggers::{
        DeleteDeployedTrigger, DeployTrigger, GetDeployedTrigger, ListDeployedTriggers,
        ListTriggerEvents, ListTriggerWebhooks, ListTriggerWorkflows, UpdateTriggerWebhooks,
        UpdateTriggerWorkflows,
    },
    webhooks::{CreateWebhook, DeleteWebhook},
};

#[derive(Default)]
pub struct AccountRepository {
    external_user_id: Option<String>,
}

impl AccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope every request to one end user
    pub fn for_user(mut self, external_user_id: impl Into<String>) -> Self {
        self.external_user_id = Some(external_user_id.into());
        self
    }

    pub fn list(&self) -> ListAccounts {
        match &self.external_user_id {
            Some(user) => ListAccounts::new().external_user_id(user.clone()),
            None => ListAccounts::new(),
        }
    }

    pub fn get(&self, account_id: impl Into<String>) -> GetAccount {
        match &self.external_user_id {
            Some(user) => GetAccount::new(account_id).external_user_id(user.clone()),
            None => GetAccount::new(account_id),
        }
    }

    pub fn delete(&self, account_id: impl Into<String>) -> DeleteAccount {
        DeleteAccount::new(account_id)
    }

    pub fn delete_for_app(&self, app_id: impl Into<String>) -> DeleteAppAccounts {
        DeleteAppAccounts::new(app_id)
    }
}

#[derive(Default)]
pub struct ComponentRepository {
    component_type: ComponentType,
}

impl ComponentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = component_type;
        self
    }

    pub fn list(&self) -> ListComponents {
        ListComponents::new(self.component_type)
    }

    pub fn get(&self, key: impl Into<String>) -> GetComponent {
        GetComponent::new(key).component_type(self.component_type)
    }

    pub fn configure(
        &self,
        key: impl Into<String>,
        prop_name: impl Into<String>,
        external_user_id: impl Into<String>,
    ) -> ConfigureComponent {
        ConfigureComponent::new(key, prop_name, external_user_id)
    }

    pub fn reload_props(
        &self,
        key: impl Into<String>,
        external_user_id: impl Into<String>,
    ) -> ReloadComponentProps {
        ReloadComponentProps::new(key, external_user_id).component_type(self.component_type)
    }
}

/// Deployed triggers always belong to an end user
#[derive(Default)]
pub struct TriggerRepository {
    external_user_id: String,
}

impl TriggerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(mut self, external_user_id: impl Into<String>) -> Self {
        self.external_user_id = external_user_id.into();
        self
    }

    pub fn deploy(&self, component_key: impl Into<String>) -> DeployTrigger {
        DeployTrigger::new(component_key, self.external_user_id.clone())
    }

    pub fn list(&self) -> ListDeployedTriggers {
        ListDeployedTriggers::new(self.external_user_id.clone())
    }

    pub fn get(&self, trigger_id: impl Into<String>) -> GetDeployedTrigger {
        GetDeployedTrigger::new(trigger_id, self.external_user_id.clone())
    }

    pub fn delete(&self, trigger_id: impl Into<String>) -> DeleteDeployedTrigger {
        DeleteDeployedTrigger::new(trigger_id, self.external_user_id.clone())
    }

    pub fn events(&self, trigger_id: impl Into<String>) -> ListTriggerEvents {
        ListTriggerEvents::new(trigger_id, self.external_user_id.clone())
    }

    pub fn webhooks(&self, trigger_id: impl Into<String>) -> ListTriggerWebhooks {
        ListTriggerWebhooks::new(trigger_id, self.external_user_id.clone())
    }

    pub fn update_webhooks(
        &self,
        trigger_id: impl Into<String>,
        webhook_urls: Vec<String>,
    ) -> UpdateTriggerWebhooks {
        UpdateTriggerWebhooks::new(trigger_id, self.external_user_id.clone(), webhook_urls)
    }

    pub fn workflows(&self, trigger_id: impl Into<String>) -> ListTriggerWorkflows {
        ListTriggerWorkflows::new(trigger_id, self.external_user_id.clone())
    }

    pub fn update_workflows(
        &self,
        trigger_id: impl Into<String>,
        workflow_ids: Vec<String>,
    ) -> UpdateTriggerWorkflows {
        UpdateTriggerWorkflows::new(trigger_id, self.external_user_id.clone(), workflow_ids)
    }
}

pub struct SourceRepository;

impl SourceRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn create(&self) -> CreateSource {
        CreateSource::new()
    }

    pub fn update(&self, source_id: impl Into<String>) -> UpdateSource {
        UpdateSource::new(source_id)
    }

    pub fn delete(&self, source_id: impl Into<String>) -> DeleteSource {
        DeleteSource::new(source_id)
    }

    pub fn events(&self, source_id: impl Into<String>) -> ListSourceEvents {
        ListSourceEvents::new(source_id)
    }

    pub fn delete_events(
        &self,
        source_id: impl Into<String>,
        start_id: impl Into<String>,
    ) -> DeleteSourceEvents {
        DeleteSourceEvents::new(source_id, start_id)
    }
}

pub struct WebhookRepository;

impl WebhookRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn create(&self, url: impl Into<String>) -> CreateWebhook {
        CreateWebhook::new(url)
    }

    pub fn delete(&self, webhook_id: impl Into<String>) -> DeleteWebhook {
        DeleteWebhook::new(webhook_id)
    }
}
