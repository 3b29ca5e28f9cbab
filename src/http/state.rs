use std::sync::Arc;

use crate::adapter::{HostedPaymentGateway, StaticIdentity};
use crate::port::{IdentityProvider, PaymentGateway};
use crate::service::{
    CheckoutService, CheckoutSettings, Reconciler, Services, StaffTerminal, boot,
};

use super::config::Config;

pub struct AppState {
    pub checkout: CheckoutService,
    pub reconciler: Reconciler,
    pub terminal: StaffTerminal,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Config,
}

impl AppState {
    pub async fn new(config: Config) -> Arc<Self> {
        let gateway: Arc<dyn PaymentGateway> = Arc::new(HostedPaymentGateway::new(
            config.gateway_url.clone(),
            config.gateway_entity.clone(),
            config.gateway_username.clone(),
            config.gateway_password.clone(),
            config.narrative.clone(),
        ));

        let services: Services = boot(gateway).await;

        let identity: Arc<dyn IdentityProvider> = match config.demo_user {
            Some(id) => Arc::new(StaticIdentity::new(id, "demo@localhost")),
            None => Arc::new(StaticIdentity::anonymous()),
        };

        let settings = CheckoutSettings {
            currency: config.currency.clone(),
            app_url: config.app_url.clone(),
        };

        Arc::new(Self {
            checkout: CheckoutService::new(
                services.registry.clone(),
                services.orders.clone(),
                services.gateway.clone(),
                settings,
            ),
            reconciler: Reconciler::new(services.registry.clone(), services.orders.clone()),
            terminal: StaffTerminal::new(services.registry.clone()),
            identity,
            config,
        })
    }
}
