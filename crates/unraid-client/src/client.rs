//! GraphQL-over-HTTP client for the Unraid management API.
//!
//! Every operation posts a `{query, variables}` document to the server's
//! `/graphql` endpoint, authenticated with an `x-api-key` header, and decodes
//! the `{data, errors}` envelope into the typed structs in [`crate::types`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use unraid_client::Client;
//!
//! # async fn example() -> Result<(), unraid_client::ClientError> {
//! let client = Client::new("http://tower.local", "my-api-key")?;
//! let containers = client.containers(Duration::from_secs(30)).await?;
//! println!("{} containers", containers.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::error::ClientError;
use crate::resolve::resolve;
use crate::types::{
    ArrayInfo, Container, LogFile, LogFileContent, Metrics, Notification, NotificationOverview,
    ParityCheck, Plugin, Share, SystemInfo, Vm,
};

/// Header carrying the API key on every request.
const API_KEY_HEADER: &str = "x-api-key";

/// Pause between stop and start when restarting a container.
const RESTART_PAUSE: Duration = Duration::from_secs(2);

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Value::is_null")]
    variables: Value,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

/// Unraid management API client.
pub struct Client {
    /// Underlying HTTP client, shared connection pool.
    http: reqwest::Client,
    /// Full endpoint URL, always ending in `/graphql`.
    url: String,
    /// API key sent with every request.
    api_key: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client for the server at `server_url`.
    ///
    /// The URL may be the server's base address or the full `/graphql`
    /// endpoint; the suffix is appended when missing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] if the HTTP client cannot be built.
    pub fn new(server_url: &str, api_key: &str) -> Result<Self, ClientError> {
        let url = if server_url.ends_with("/graphql") {
            server_url.to_string()
        } else {
            format!("{}/graphql", server_url.trim_end_matches('/'))
        };

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        debug!(url = %url, "Created API client");

        Ok(Self {
            http,
            url,
            api_key: api_key.to_string(),
        })
    }

    /// The endpoint URL this client posts to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Post a document and decode the data envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
        timeout: Duration,
    ) -> Result<T, ClientError> {
        trace!(url = %self.url, "Sending GraphQL request");

        let response = self
            .http
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(timeout)
            .json(&GraphQlRequest {
                query: document,
                variables,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout(e.to_string())
                } else {
                    ClientError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        if let Some(error) = envelope.errors.first() {
            return Err(ClientError::Api {
                message: error.message.clone(),
            });
        }

        envelope
            .data
            .ok_or_else(|| ClientError::Decode("response carried no data".into()))
    }

    // ========================================================================
    // System Operations
    // ========================================================================

    /// Verify that the server answers with a non-empty identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server identifies as
    /// empty.
    pub async fn test_connection(&self, timeout: Duration) -> Result<(), ClientError> {
        const QUERY: &str = "
            query {
                info {
                    id
                    os {
                        platform
                    }
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            info: Identity,
        }
        #[derive(Deserialize)]
        struct Identity {
            #[serde(default)]
            id: String,
        }

        let data: Data = self.execute(QUERY, Value::Null, timeout).await?;
        if data.info.id.is_empty() {
            return Err(ClientError::Decode("received empty identity".into()));
        }
        Ok(())
    }

    /// Fetch static system information.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn system_info(&self, timeout: Duration) -> Result<SystemInfo, ClientError> {
        const QUERY: &str = "
            query {
                info {
                    cpu {
                        manufacturer
                        brand
                        cores
                        threads
                        speed
                    }
                    memory {
                        layout {
                            size
                        }
                    }
                    os {
                        platform
                        hostname
                        uptime
                    }
                    versions {
                        core {
                            unraid
                        }
                    }
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            info: SystemInfo,
        }

        let data: Data = self.execute(QUERY, Value::Null, timeout).await?;
        Ok(data.info)
    }

    // ========================================================================
    // Array Operations
    // ========================================================================

    /// Fetch array state, capacity, and all disk groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn array(&self, timeout: Duration) -> Result<ArrayInfo, ClientError> {
        const QUERY: &str = "
            query {
                array {
                    state
                    capacity {
                        kilobytes {
                            total
                            used
                            free
                        }
                    }
                    boot {
                        id
                        name
                        device
                        status
                        size
                        temp
                        type
                        fsType
                    }
                    parities {
                        id
                        name
                        device
                        status
                        size
                        temp
                        type
                        fsType
                    }
                    disks {
                        id
                        name
                        device
                        status
                        size
                        temp
                        type
                        fsType
                    }
                    caches {
                        id
                        name
                        device
                        status
                        size
                        temp
                        type
                        fsType
                    }
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            array: ArrayInfo,
        }

        let data: Data = self.execute(QUERY, Value::Null, timeout).await?;
        Ok(data.array)
    }

    /// Start the array.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn start_array(&self, timeout: Duration) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation {
                array {
                    setState(input: {desiredState: START}) {
                        state
                    }
                }
            }
        ";

        let _: Value = self.execute(MUTATION, Value::Null, timeout).await?;
        Ok(())
    }

    /// Stop the array.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn stop_array(&self, timeout: Duration) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation {
                array {
                    setState(input: {desiredState: STOP}) {
                        state
                    }
                }
            }
        ";

        let _: Value = self.execute(MUTATION, Value::Null, timeout).await?;
        Ok(())
    }

    // ========================================================================
    // Docker Operations
    // ========================================================================

    /// List all Docker containers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn containers(&self, timeout: Duration) -> Result<Vec<Container>, ClientError> {
        const QUERY: &str = "
            query {
                docker {
                    containers {
                        id
                        names
                        image
                        state
                        status
                        autoStart
                    }
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            docker: Docker,
        }
        #[derive(Deserialize)]
        struct Docker {
            #[serde(default)]
            containers: Vec<Container>,
        }

        let data: Data = self.execute(QUERY, Value::Null, timeout).await?;
        Ok(data.docker.containers)
    }

    /// Resolve a container id, name, or id prefix to its full id.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails or nothing matches.
    pub async fn find_container_id(
        &self,
        token: &str,
        timeout: Duration,
    ) -> Result<String, ClientError> {
        let containers = self.containers(timeout).await?;
        let id = resolve(&containers, token)?;
        Ok(id.to_string())
    }

    /// Start a container addressed by id, name, or id prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution or the mutation fails.
    pub async fn start_container(&self, token: &str, timeout: Duration) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation($id: PrefixedID!) {
                docker {
                    start(id: $id) {
                        id
                        state
                    }
                }
            }
        ";

        let id = self.find_container_id(token, timeout).await?;
        let _: Value = self.execute(MUTATION, json!({ "id": id }), timeout).await?;
        Ok(())
    }

    /// Stop a container addressed by id, name, or id prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution or the mutation fails.
    pub async fn stop_container(&self, token: &str, timeout: Duration) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation($id: PrefixedID!) {
                docker {
                    stop(id: $id) {
                        id
                        state
                    }
                }
            }
        ";

        let id = self.find_container_id(token, timeout).await?;
        let _: Value = self.execute(MUTATION, json!({ "id": id }), timeout).await?;
        Ok(())
    }

    /// Restart a container: stop, short pause, start.
    ///
    /// # Errors
    ///
    /// Returns an error if either phase fails.
    pub async fn restart_container(
        &self,
        token: &str,
        timeout: Duration,
    ) -> Result<(), ClientError> {
        self.stop_container(token, timeout).await?;
        tokio::time::sleep(RESTART_PAUSE).await;
        self.start_container(token, timeout).await
    }

    // ========================================================================
    // VM Operations
    // ========================================================================

    /// List all virtual machines.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn vms(&self, timeout: Duration) -> Result<Vec<Vm>, ClientError> {
        const QUERY: &str = "
            query {
                vms {
                    domains {
                        id
                        name
                        state
                    }
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            vms: Domains,
        }
        #[derive(Deserialize)]
        struct Domains {
            #[serde(default)]
            domains: Vec<Vm>,
        }

        let data: Data = self.execute(QUERY, Value::Null, timeout).await?;
        Ok(data.vms.domains)
    }

    /// Resolve a VM id, name, or id prefix to its full id.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails or nothing matches.
    pub async fn find_vm_id(&self, token: &str, timeout: Duration) -> Result<String, ClientError> {
        let vms = self.vms(timeout).await?;
        let id = resolve(&vms, token)?;
        Ok(id.to_string())
    }

    /// Start a VM addressed by id, name, or id prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution or the mutation fails.
    pub async fn start_vm(&self, token: &str, timeout: Duration) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation($id: PrefixedID!) {
                vm {
                    start(id: $id)
                }
            }
        ";

        let id = self.find_vm_id(token, timeout).await?;
        let _: Value = self.execute(MUTATION, json!({ "id": id }), timeout).await?;
        Ok(())
    }

    /// Stop a VM addressed by id, name, or id prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution or the mutation fails.
    pub async fn stop_vm(&self, token: &str, timeout: Duration) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation($id: PrefixedID!) {
                vm {
                    stop(id: $id)
                }
            }
        ";

        let id = self.find_vm_id(token, timeout).await?;
        let _: Value = self.execute(MUTATION, json!({ "id": id }), timeout).await?;
        Ok(())
    }

    /// Reboot a VM addressed by id, name, or id prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution or the mutation fails.
    pub async fn reboot_vm(&self, token: &str, timeout: Duration) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation($id: PrefixedID!) {
                vm {
                    reboot(id: $id)
                }
            }
        ";

        let id = self.find_vm_id(token, timeout).await?;
        let _: Value = self.execute(MUTATION, json!({ "id": id }), timeout).await?;
        Ok(())
    }

    // ========================================================================
    // Share Operations
    // ========================================================================

    /// List all user shares.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn shares(&self, timeout: Duration) -> Result<Vec<Share>, ClientError> {
        const QUERY: &str = "
            query {
                shares {
                    id
                    name
                    free
                    used
                    size
                    include
                    exclude
                    cache
                    comment
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            #[serde(default)]
            shares: Vec<Share>,
        }

        let data: Data = self.execute(QUERY, Value::Null, timeout).await?;
        Ok(data.shares)
    }

    // ========================================================================
    // Metrics Operations
    // ========================================================================

    /// Fetch point-in-time CPU and memory metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn metrics(&self, timeout: Duration) -> Result<Metrics, ClientError> {
        const QUERY: &str = "
            query {
                metrics {
                    cpu {
                        percentTotal
                        cpus {
                            percentTotal
                            percentUser
                            percentSystem
                            percentIdle
                        }
                    }
                    memory {
                        total
                        used
                        free
                        available
                        percentTotal
                        swapTotal
                        swapUsed
                        swapFree
                        percentSwapTotal
                    }
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            metrics: Metrics,
        }

        let data: Data = self.execute(QUERY, Value::Null, timeout).await?;
        Ok(data.metrics)
    }

    // ========================================================================
    // Parity Operations
    // ========================================================================

    /// Fetch the live parity check status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn parity_status(&self, timeout: Duration) -> Result<ParityCheck, ClientError> {
        const QUERY: &str = "
            query {
                array {
                    parityCheckStatus {
                        date
                        duration
                        speed
                        status
                        errors
                        progress
                        correcting
                        paused
                        running
                    }
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            array: Status,
        }
        #[derive(Deserialize)]
        struct Status {
            #[serde(rename = "parityCheckStatus")]
            parity_check_status: ParityCheck,
        }

        let data: Data = self.execute(QUERY, Value::Null, timeout).await?;
        Ok(data.array.parity_check_status)
    }

    /// Fetch the parity check history, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn parity_history(&self, timeout: Duration) -> Result<Vec<ParityCheck>, ClientError> {
        const QUERY: &str = "
            query {
                parityHistory {
                    date
                    duration
                    speed
                    status
                    errors
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "parityHistory", default)]
            parity_history: Vec<ParityCheck>,
        }

        let data: Data = self.execute(QUERY, Value::Null, timeout).await?;
        Ok(data.parity_history)
    }

    /// Start a parity check, optionally writing corrections.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn start_parity_check(
        &self,
        correct: bool,
        timeout: Duration,
    ) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation($correct: Boolean!) {
                parityCheck {
                    start(correct: $correct)
                }
            }
        ";

        let _: Value = self
            .execute(MUTATION, json!({ "correct": correct }), timeout)
            .await?;
        Ok(())
    }

    /// Pause a running parity check.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn pause_parity_check(&self, timeout: Duration) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation {
                parityCheck {
                    pause
                }
            }
        ";

        let _: Value = self.execute(MUTATION, Value::Null, timeout).await?;
        Ok(())
    }

    /// Resume a paused parity check.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn resume_parity_check(&self, timeout: Duration) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation {
                parityCheck {
                    resume
                }
            }
        ";

        let _: Value = self.execute(MUTATION, Value::Null, timeout).await?;
        Ok(())
    }

    /// Cancel a running parity check.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn cancel_parity_check(&self, timeout: Duration) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation {
                parityCheck {
                    cancel
                }
            }
        ";

        let _: Value = self.execute(MUTATION, Value::Null, timeout).await?;
        Ok(())
    }

    // ========================================================================
    // Notification Operations
    // ========================================================================

    /// List notifications from one pool with paging and an optional
    /// importance filter.
    ///
    /// `notification_type` is `"UNREAD"` or `"ARCHIVE"`; `importance` is one
    /// of `"INFO"`, `"WARNING"`, `"ALERT"` when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn notifications(
        &self,
        notification_type: &str,
        importance: Option<&str>,
        offset: i64,
        limit: i64,
        timeout: Duration,
    ) -> Result<Vec<Notification>, ClientError> {
        const QUERY: &str = "
            query($type: NotificationType!, $importance: NotificationImportance, $offset: Int!, $limit: Int!) {
                notifications {
                    list(filter: {type: $type, importance: $importance, offset: $offset, limit: $limit}) {
                        id
                        title
                        subject
                        description
                        importance
                        link
                        type
                        timestamp
                    }
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            notifications: List,
        }
        #[derive(Deserialize)]
        struct List {
            #[serde(default)]
            list: Vec<Notification>,
        }

        let mut variables = json!({
            "type": notification_type,
            "offset": offset,
            "limit": limit,
        });
        if let Some(importance) = importance {
            variables["importance"] = json!(importance);
        }

        let data: Data = self.execute(QUERY, variables, timeout).await?;
        Ok(data.notifications.list)
    }

    /// Fetch notification counts for both pools.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn notification_overview(
        &self,
        timeout: Duration,
    ) -> Result<NotificationOverview, ClientError> {
        const QUERY: &str = "
            query {
                notifications {
                    overview {
                        unread {
                            info
                            warning
                            alert
                            total
                        }
                        archive {
                            info
                            warning
                            alert
                            total
                        }
                    }
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            notifications: Overview,
        }
        #[derive(Deserialize)]
        struct Overview {
            overview: NotificationOverview,
        }

        let data: Data = self.execute(QUERY, Value::Null, timeout).await?;
        Ok(data.notifications.overview)
    }

    /// Archive a notification by its full id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn archive_notification(
        &self,
        id: &str,
        timeout: Duration,
    ) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation($id: PrefixedID!) {
                archiveNotification(id: $id) {
                    id
                }
            }
        ";

        let _: Value = self.execute(MUTATION, json!({ "id": id }), timeout).await?;
        Ok(())
    }

    // ========================================================================
    // Log Operations
    // ========================================================================

    /// List the log files available on the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn log_files(&self, timeout: Duration) -> Result<Vec<LogFile>, ClientError> {
        const QUERY: &str = "
            query {
                logFiles {
                    name
                    path
                    size
                    modifiedAt
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "logFiles", default)]
            log_files: Vec<LogFile>,
        }

        let data: Data = self.execute(QUERY, Value::Null, timeout).await?;
        Ok(data.log_files)
    }

    /// Fetch a window of a log file's content.
    ///
    /// `lines` caps the number of lines returned; `start_line` sets where the
    /// window begins. Both are server defaults when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn log_file(
        &self,
        path: &str,
        lines: Option<i64>,
        start_line: Option<i64>,
        timeout: Duration,
    ) -> Result<LogFileContent, ClientError> {
        const QUERY: &str = "
            query($path: String!, $lines: Int, $startLine: Int) {
                logFile(path: $path, lines: $lines, startLine: $startLine) {
                    path
                    content
                    totalLines
                    startLine
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "logFile")]
            log_file: LogFileContent,
        }

        let mut variables = json!({ "path": path });
        if let Some(lines) = lines {
            variables["lines"] = json!(lines);
        }
        if let Some(start_line) = start_line {
            variables["startLine"] = json!(start_line);
        }

        let data: Data = self.execute(QUERY, variables, timeout).await?;
        Ok(data.log_file)
    }

    // ========================================================================
    // Plugin Operations
    // ========================================================================

    /// List installed API plugins.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn plugins(&self, timeout: Duration) -> Result<Vec<Plugin>, ClientError> {
        const QUERY: &str = "
            query {
                plugins {
                    name
                    version
                    hasApiModule
                    hasCliModule
                }
            }
        ";

        #[derive(Deserialize)]
        struct Data {
            #[serde(default)]
            plugins: Vec<Plugin>,
        }

        let data: Data = self.execute(QUERY, Value::Null, timeout).await?;
        Ok(data.plugins)
    }

    /// Install one or more plugins by package name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_plugins(
        &self,
        names: &[String],
        bundled: bool,
        restart: bool,
        timeout: Duration,
    ) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation($input: PluginManagementInput!) {
                addPlugin(input: $input)
            }
        ";

        let variables = json!({
            "input": {
                "names": names,
                "bundled": bundled,
                "restart": restart,
            }
        });

        let _: Value = self.execute(MUTATION, variables, timeout).await?;
        Ok(())
    }

    /// Remove one or more plugins by package name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove_plugins(
        &self,
        names: &[String],
        bundled: bool,
        restart: bool,
        timeout: Duration,
    ) -> Result<(), ClientError> {
        const MUTATION: &str = "
            mutation($input: PluginManagementInput!) {
                removePlugin(input: $input)
            }
        ";

        let variables = json!({
            "input": {
                "names": names,
                "bundled": bundled,
                "restart": restart,
            }
        });

        let _: Value = self.execute(MUTATION, variables, timeout).await?;
        Ok(())
    }
}
