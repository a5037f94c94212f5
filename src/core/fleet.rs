use crate::config::fleet::FleetConfig;
use crate::core::service::router_for;
use crate::domain::model::ServiceSpec;
use crate::utils::error::{GreetError, Result};
use crate::utils::validation::Validate;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;

pub struct Fleet;

struct BoundService {
    spec: ServiceSpec,
    listener: TcpListener,
    addr: SocketAddr,
}

/// Every listener bound, none serving yet.
pub struct BoundFleet {
    services: Vec<BoundService>,
}

impl Fleet {
    /// Validate the config and bind every service. Nothing is served until
    /// [`BoundFleet::serve`] is called.
    pub async fn bind(config: &FleetConfig) -> Result<BoundFleet> {
        config.validate()?;

        let mut services = Vec::with_capacity(config.services.len());
        for spec in &config.services {
            let requested = format!("{}:{}", config.host, spec.port);
            let listener = TcpListener::bind(&requested)
                .await
                .map_err(|source| GreetError::BindError {
                    service: spec.name.clone(),
                    addr: requested.clone(),
                    source,
                })?;
            let addr = listener.local_addr()?;
            tracing::info!("🚀 {} listening on http://{}", spec.name, addr);

            services.push(BoundService {
                spec: spec.clone(),
                listener,
                addr,
            });
        }

        Ok(BoundFleet { services })
    }
}

impl BoundFleet {
    pub fn local_addrs(&self) -> Vec<(String, SocketAddr)> {
        self.services
            .iter()
            .map(|s| (s.spec.name.clone(), s.addr))
            .collect()
    }

    pub fn addr_of(&self, name: &str) -> Option<SocketAddr> {
        self.services
            .iter()
            .find(|s| s.spec.name == name)
            .map(|s| s.addr)
    }

    /// Serve until `shutdown` resolves, then drain every listener. The first
    /// listener failure stops the whole fleet and is returned.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let (stop_tx, stop_rx) = watch::channel(false);
        let mut tasks = JoinSet::new();

        for service in self.services {
            let mut stop_rx = stop_rx.clone();
            let app = router_for(&service.spec);
            let name = service.spec.name;

            tasks.spawn(async move {
                let result = axum::serve(service.listener, app)
                    .with_graceful_shutdown(async move {
                        // 只會送出 true，任何變更都代表停止
                        let _ = stop_rx.changed().await;
                    })
                    .await;
                (name, result)
            });
        }

        tokio::pin!(shutdown);
        let mut stopping = false;
        let mut first_error: Option<GreetError> = None;

        loop {
            tokio::select! {
                _ = &mut shutdown, if !stopping => {
                    tracing::info!("🛑 Shutdown requested, stopping services");
                    stopping = true;
                    let _ = stop_tx.send(true);
                }
                joined = tasks.join_next() => {
                    let Some(joined) = joined else { break };
                    let failure = match joined {
                        Ok((name, Ok(()))) => {
                            tracing::info!("{} stopped", name);
                            None
                        }
                        Ok((name, Err(e))) => Some(GreetError::ServiceError {
                            service: name,
                            message: e.to_string(),
                        }),
                        Err(e) => Some(GreetError::ServiceError {
                            service: "<unknown>".to_string(),
                            message: e.to_string(),
                        }),
                    };

                    if let Some(err) = failure {
                        tracing::error!("❌ {}", err);
                        if first_error.is_none() {
                            first_error = Some(err);
                        }
                        if !stopping {
                            stopping = true;
                            let _ = stop_tx.send(true);
                        }
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config(services: Vec<ServiceSpec>) -> FleetConfig {
        FleetConfig {
            host: "127.0.0.1".to_string(),
            services,
        }
    }

    #[tokio::test]
    async fn test_bind_reports_ephemeral_addrs() {
        let config = local_config(vec![
            ServiceSpec::greeting("beta", 0, "¡Hola desde Beta!"),
            ServiceSpec::lambda("backend", 0),
        ]);
        let fleet = Fleet::bind(&config).await.unwrap();

        let addrs = fleet.local_addrs();
        assert_eq!(addrs.len(), 2);
        assert!(addrs.iter().all(|(_, addr)| addr.port() != 0));
        assert_eq!(fleet.addr_of("backend"), Some(addrs[1].1));
        assert!(fleet.addr_of("missing").is_none());
    }

    #[tokio::test]
    async fn test_bind_rejects_invalid_config() {
        let config = local_config(vec![
            ServiceSpec::greeting("beta", 3001, "a"),
            ServiceSpec::greeting("fabrizzio", 3001, "b"),
        ]);
        assert!(matches!(
            Fleet::bind(&config).await,
            Err(GreetError::PortConflict { port: 3001, .. })
        ));
    }

    #[tokio::test]
    async fn test_bind_fails_when_port_taken() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let config = local_config(vec![ServiceSpec::greeting("charlie", port, "hi")]);
        match Fleet::bind(&config).await {
            Err(GreetError::BindError { service, addr, .. }) => {
                assert_eq!(service, "charlie");
                assert_eq!(addr, format!("127.0.0.1:{}", port));
            }
            Err(other) => panic!("expected bind error, got {:?}", other),
            Ok(_) => panic!("expected bind error"),
        }
    }

    #[tokio::test]
    async fn test_serve_returns_after_shutdown() {
        let config = local_config(vec![ServiceSpec::greeting("beta", 0, "hi")]);
        let fleet = Fleet::bind(&config).await.unwrap();
        let result = fleet.serve(async {}).await;
        assert!(result.is_ok());
    }
}
