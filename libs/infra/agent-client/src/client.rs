// [libs/infra/agent-client/src/client.rs]
/*!
 * APARATO: COORDINATOR CLIENT
 * RESPONSABILIDAD: ENVOLTORIO REQWEST SOBRE LA SUPERFICIE HTTP DEL
 * COORDINADOR (§6), USADO POR LOS BUCLES DEL AGENTE (§4.7).
 *
 * Cada metodo corresponde a una fila de la tabla de rutas del §6. Las
 * descargas de archivos de catalogo transmiten el cuerpo directamente a
 * disco en vez de materializarlo en memoria (§4.3 AMBIENT).
 */

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use hashwarden_domain_models::{
    Agent, AgentStatus, AutoSplitRequest, ClaimAgentRequest, CompleteRequest, FailRequest,
    HeartbeatRequest, JobDataRequest, ProgressRequest, SetAgentSpeedRequest,
    SetAgentStatusRequest, SubJob, UpdateAgentDataRequest,
};
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::errors::ClientError;

/// Tiempo de espera generoso para descargas grandes (§5 "Timeouts").
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);
/// Tiempo de espera corto para latidos y sondeos frecuentes (§5 "Timeouts").
const SHORT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct CoordinatorClient {
    base_url: String,
    auth_token: String,
    short: Client,
    long: Client,
}

impl CoordinatorClient {
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: auth_token.into(),
            short: Client::builder()
                .timeout(SHORT_TIMEOUT)
                .build()
                .expect("reqwest client builds with static config"),
            long: Client::builder()
                .timeout(DOWNLOAD_TIMEOUT)
                .build()
                .expect("reqwest client builds with static config"),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        match response.status() {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            status if status.is_success() => Ok(response),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ClientError::Rejected(status.as_u16(), body))
            }
        }
    }

    /// `POST /agents` — reclama la identidad emitida por el operador (§4.1, §4.7 paso 5).
    pub async fn claim_agent(
        &self,
        agent_key: &str,
        name: Option<String>,
        ip_address: Option<String>,
        port: Option<u16>,
        capabilities: Option<String>,
    ) -> Result<Agent, ClientError> {
        let response = self
            .short
            .post(self.url("/agents"))
            .bearer_auth(&self.auth_token)
            .json(&ClaimAgentRequest {
                agent_key: agent_key.to_string(),
                name,
                ip_address,
                port,
                capabilities,
            })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /agents/heartbeat` (§4.7 "Heartbeat").
    pub async fn heartbeat(&self, agent_key: &str) -> Result<Agent, ClientError> {
        let response = self
            .short
            .post(self.url("/agents/heartbeat"))
            .bearer_auth(&self.auth_token)
            .json(&HeartbeatRequest {
                agent_key: agent_key.to_string(),
            })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /agents/update-data` (§4.7 "File watcher" re-advertisement).
    pub async fn update_data(
        &self,
        agent_key: &str,
        ip_address: Option<String>,
        port: Option<u16>,
        capabilities: Option<String>,
    ) -> Result<Agent, ClientError> {
        let response = self
            .short
            .post(self.url("/agents/update-data"))
            .bearer_auth(&self.auth_token)
            .json(&UpdateAgentDataRequest {
                agent_key: agent_key.to_string(),
                ip_address,
                port,
                capabilities,
            })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `PUT /agents/:id/status`.
    pub async fn set_status(&self, id: Uuid, status: AgentStatus) -> Result<Agent, ClientError> {
        let response = self
            .short
            .put(self.url(&format!("/agents/{id}/status")))
            .bearer_auth(&self.auth_token)
            .json(&SetAgentStatusRequest { status })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `PUT /agents/:id/speed`.
    pub async fn set_speed(&self, id: Uuid, speed: u64) -> Result<Agent, ClientError> {
        let response = self
            .short
            .put(self.url(&format!("/agents/{id}/speed")))
            .bearer_auth(&self.auth_token)
            .json(&SetAgentSpeedRequest { speed })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /jobs/auto`.
    pub async fn auto_split(&self, request: &AutoSplitRequest) -> Result<Vec<SubJob>, ClientError> {
        let response = self
            .short
            .post(self.url("/jobs/auto"))
            .bearer_auth(&self.auth_token)
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `GET /jobs/agent/:id` — siguiente sub-job pendiente o `None` (§4.5, §4.7 "Job poll").
    pub async fn next_for_agent(&self, agent_id: Uuid) -> Result<Option<SubJob>, ClientError> {
        let response = self
            .short
            .get(self.url(&format!("/jobs/agent/{agent_id}")))
            .bearer_auth(&self.auth_token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `GET /jobs/:id` — estado actual del sub-job (§4.7 "Sub-job status watcher").
    pub async fn get_subjob(&self, id: Uuid) -> Result<SubJob, ClientError> {
        let response = self
            .short
            .get(self.url(&format!("/jobs/{id}")))
            .bearer_auth(&self.auth_token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /jobs/:id/start`.
    pub async fn start_subjob(&self, id: Uuid) -> Result<SubJob, ClientError> {
        let response = self
            .short
            .post(self.url(&format!("/jobs/{id}/start")))
            .bearer_auth(&self.auth_token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `PUT /jobs/:id/progress` — tick minimo de progreso (§4.6).
    pub async fn post_progress(
        &self,
        id: Uuid,
        progress: u8,
        speed: u64,
        eta: Option<String>,
    ) -> Result<SubJob, ClientError> {
        let response = self
            .short
            .put(self.url(&format!("/jobs/{id}/progress")))
            .bearer_auth(&self.auth_token)
            .json(&ProgressRequest {
                progress,
                speed,
                eta,
            })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `PUT /jobs/:id/data` — tick enriquecido (§4.6).
    pub async fn post_data(&self, id: Uuid, data: JobDataRequest) -> Result<SubJob, ClientError> {
        let response = self
            .short
            .put(self.url(&format!("/jobs/{id}/data")))
            .bearer_auth(&self.auth_token)
            .json(&data)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /jobs/:id/complete` (§4.8 "Local verification").
    pub async fn complete(&self, id: Uuid, result: String) -> Result<SubJob, ClientError> {
        let response = self
            .short
            .post(self.url(&format!("/jobs/{id}/complete")))
            .bearer_auth(&self.auth_token)
            .json(&CompleteRequest { result })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /jobs/:id/fail`.
    pub async fn fail(&self, id: Uuid, reason: String) -> Result<SubJob, ClientError> {
        let response = self
            .short
            .post(self.url(&format!("/jobs/{id}/fail")))
            .bearer_auth(&self.auth_token)
            .json(&FailRequest { reason })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn post_empty(&self, path: &str) -> Result<SubJob, ClientError> {
        let response = self
            .short
            .post(self.url(path))
            .bearer_auth(&self.auth_token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn pause(&self, id: Uuid) -> Result<SubJob, ClientError> {
        self.post_empty(&format!("/jobs/{id}/pause")).await
    }

    pub async fn resume(&self, id: Uuid) -> Result<SubJob, ClientError> {
        self.post_empty(&format!("/jobs/{id}/resume")).await
    }

    pub async fn stop(&self, id: Uuid) -> Result<SubJob, ClientError> {
        self.post_empty(&format!("/jobs/{id}/stop")).await
    }

    /// `GET /wordlists/:id/download` — transmite directamente a `dest` sin
    /// materializar el archivo completo en memoria (§4.3 AMBIENT).
    pub async fn download_wordlist(&self, id: Uuid, dest: &Path) -> Result<(), ClientError> {
        self.stream_download(&format!("/wordlists/{id}/download"), dest)
            .await
    }

    /// `GET /hashfiles/:id/download`.
    pub async fn download_hashfile(&self, id: Uuid, dest: &Path) -> Result<(), ClientError> {
        self.stream_download(&format!("/hashfiles/{id}/download"), dest)
            .await
    }

    /// `POST /agents/:id/shutdown` — restaura el puerto en reposo antes de
    /// que el proceso del agente termine (§4.7 "Shutdown sequence").
    pub async fn shutdown_agent(&self, id: Uuid) -> Result<Agent, ClientError> {
        let response = self
            .short
            .post(self.url(&format!("/agents/{id}/shutdown")))
            .bearer_auth(&self.auth_token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn stream_download(&self, path: &str, dest: &Path) -> Result<(), ClientError> {
        let response = self
            .long
            .get(self.url(path))
            .bearer_auth(&self.auth_token)
            .send()
            .await?;
        let response = Self::check(response).await?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = File::create(dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        Ok(())
    }
}
