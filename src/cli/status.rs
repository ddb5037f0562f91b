use crate::{collaborator::HttpCollaborator, config, info, success, warning};

pub async fn status() {
    let collaborator = HttpCollaborator::from_env();
    info!("Analysis service: {}", collaborator.base_url());
    info!("Callback listener: http://{}", config::callback_addr());
    info!("On failed load: {}", config::failure_policy());

    match collaborator.health().await {
        Ok(health) => success!("Service is up (status: {}).", health.status),
        Err(e) => warning!("Service is not reachable: {}", e),
    }
}
