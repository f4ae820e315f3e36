//! Method dispatch facade.
//!
//! [`WebApiClient`] exposes one method per supported remote operation. Every
//! method validates its arguments against the operation's row in the static
//! [`operations`] table and then forwards to the blocking-style exchange of
//! the underlying [`RpcClient`] with the row's remote identifier.
//!
//! # Example
//!
//! ```no_run
//! use kdsvc_rpc::{ClientConfig, LoginRequest, WebApiClient};
//! use serde_json::json;
//!
//! # async fn example() -> kdsvc_rpc::Result<()> {
//! let client = WebApiClient::new(ClientConfig::new("http://erp.example.com/k3cloud/"))?;
//!
//! client.login(LoginRequest::credentials("5f1a", "administrator", "secret")).await?;
//! let saved = client
//!     .save("BD_MATERIAL", &json!({"Model": {"FNumber": "M-001", "FName": "Bolt"}}))
//!     .await?;
//! client.logout().await?;
//! # Ok(())
//! # }
//! ```

pub mod operations;

mod login;
mod signature;

use serde::Serialize;
use serde_json::Value;

pub use login::{resolve as resolve_login, LoginRequest, DEFAULT_LCID};
pub use operations::RemoteMethod;
pub use signature::ParamKind;

use crate::{ClientConfig, Result, RpcClient, RpcError};

/// Named business operations over an [`RpcClient`].
///
/// Cheap to clone; clones share the client and its session.
#[derive(Clone)]
pub struct WebApiClient {
    rpc: RpcClient,
}

impl WebApiClient {
    // ---

    /// Construct the underlying [`RpcClient`] from `config`.
    ///
    /// # Errors
    ///
    /// See [`RpcClient::new`].
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_rpc(RpcClient::new(config)?))
    }

    /// Wrap an existing client.
    pub fn from_rpc(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    /// The underlying execution engine.
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Invoke a facade operation by its table name with positional arguments.
    ///
    /// # Errors
    ///
    /// `RpcError::Contract` for an unknown name or mismatching arguments,
    /// otherwise as [`RpcClient::execute`].
    pub async fn call(&self, name: &str, args: Vec<Value>) -> Result<Value> {
        // ---
        let method = operations::lookup(name)
            .ok_or_else(|| RpcError::contract("call", format!("unknown operation {name:?}")))?;
        self.invoke(method, args).await
    }

    async fn invoke(&self, method: &RemoteMethod, args: Vec<Value>) -> Result<Value> {
        // ---
        signature::check(method, &args)?;
        self.rpc.execute(method.identifier, args).await
    }

    async fn form_call(
        &self,
        method: &RemoteMethod,
        form_id: &str,
        data: &impl Serialize,
    ) -> Result<Value> {
        // ---
        let args = vec![Value::from(form_id), serde_json::to_value(data)?];
        self.invoke(method, args).await
    }

    async fn data_call(&self, method: &RemoteMethod, data: &impl Serialize) -> Result<Value> {
        // ---
        self.invoke(method, vec![serde_json::to_value(data)?]).await
    }

    // --- authentication

    /// Log in with any of the server's login forms.
    ///
    /// # Errors
    ///
    /// As [`RpcClient::execute`]. A rejected login is a successful outcome
    /// whose payload reports the failure.
    pub async fn login(&self, request: LoginRequest) -> Result<Value> {
        // ---
        let method = request.method();
        tracing::debug!(form = method.name, "login");
        self.invoke(method, request.to_parameters()).await
    }

    /// Log in from a positional argument list, resolving the login form
    /// from the argument count and, for six arguments, the kind of the
    /// fifth.
    ///
    /// # Errors
    ///
    /// `RpcError::Contract` before any I/O if the arguments match no login
    /// form, otherwise as [`login`](Self::login).
    pub async fn login_with_args(&self, args: Vec<Value>) -> Result<Value> {
        self.login(LoginRequest::from_args(args)?).await
    }

    /// Credential login through `ValidateUser`.
    ///
    /// # Errors
    ///
    /// As [`login`](Self::login).
    pub async fn validate_login(
        &self,
        db_id: &str,
        user_name: &str,
        password: &str,
        lcid: i64,
    ) -> Result<Value> {
        self.login(LoginRequest::credentials(db_id, user_name, password).with_lcid(lcid))
            .await
    }

    /// Credential login through `ValidateUser2`, with a kick-off flag.
    ///
    /// # Errors
    ///
    /// As [`login`](Self::login).
    pub async fn validate_login2(
        &self,
        db_id: &str,
        user_name: &str,
        password: &str,
        kick_off: bool,
        lcid: i64,
    ) -> Result<Value> {
        self.login(
            LoginRequest::credentials(db_id, user_name, password)
                .kick_off(kick_off)
                .with_lcid(lcid),
        )
        .await
    }

    /// End the current session.
    ///
    /// # Errors
    ///
    /// As [`RpcClient::execute`].
    pub async fn logout(&self) -> Result<Value> {
        self.rpc
            .execute(operations::LOGOUT.identifier, Vec::new())
            .await
    }

    /// List the data centers (account sets) known to the server.
    ///
    /// # Errors
    ///
    /// As [`RpcClient::execute`].
    pub async fn get_data_center(&self) -> Result<Value> {
        self.rpc
            .execute(operations::GET_DATA_CENTER.identifier, Vec::new())
            .await
    }

    // --- business operations on a form

    /// Save (create or update) documents of a form.
    ///
    /// # Errors
    ///
    /// `RpcError::Contract` if `data` does not serialize to a JSON object or
    /// array, otherwise as [`RpcClient::execute`].
    pub async fn save(&self, form_id: &str, data: &impl Serialize) -> Result<Value> {
        self.form_call(&operations::SAVE, form_id, data).await
    }

    /// Save several documents of a form in one call.
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn batch_save(&self, form_id: &str, data: &impl Serialize) -> Result<Value> {
        self.form_call(&operations::BATCH_SAVE, form_id, data).await
    }

    /// Save documents through the form's flexible save entry point.
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn flex_save(&self, form_id: &str, data: &impl Serialize) -> Result<Value> {
        self.form_call(&operations::FLEX_SAVE, form_id, data).await
    }

    /// Save without validation (draft).
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn draft(&self, form_id: &str, data: &impl Serialize) -> Result<Value> {
        self.form_call(&operations::DRAFT, form_id, data).await
    }

    /// Submit a form's documents for approval.
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn submit(&self, form_id: &str, data: &impl Serialize) -> Result<Value> {
        self.form_call(&operations::SUBMIT, form_id, data).await
    }

    /// Approve submitted documents of a form.
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn audit(&self, form_id: &str, data: &impl Serialize) -> Result<Value> {
        self.form_call(&operations::AUDIT, form_id, data).await
    }

    /// Withdraw the approval of documents of a form.
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn un_audit(&self, form_id: &str, data: &impl Serialize) -> Result<Value> {
        self.form_call(&operations::UN_AUDIT, form_id, data).await
    }

    /// Read a single document of a form.
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn view(&self, form_id: &str, data: &impl Serialize) -> Result<Value> {
        self.form_call(&operations::VIEW, form_id, data).await
    }

    /// Delete documents of a form.
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn delete(&self, form_id: &str, data: &impl Serialize) -> Result<Value> {
        self.form_call(&operations::DELETE, form_id, data).await
    }

    /// Allocate documents of a form to other organizations.
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn allocate(&self, form_id: &str, data: &impl Serialize) -> Result<Value> {
        self.form_call(&operations::ALLOCATE, form_id, data).await
    }

    /// Run a named form operation such as `Cancel` or `Forbid`.
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn execute_operation(
        &self,
        form_id: &str,
        op_number: &str,
        data: &impl Serialize,
    ) -> Result<Value> {
        // ---
        let args = vec![
            Value::from(form_id),
            Value::from(op_number),
            serde_json::to_value(data)?,
        ];
        self.invoke(&operations::EXECUTE_OPERATION, args).await
    }

    // --- form-less operations

    /// Query rows of a form with field keys and a filter.
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn execute_bill_query(&self, data: &impl Serialize) -> Result<Value> {
        self.data_call(&operations::EXECUTE_BILL_QUERY, data).await
    }

    /// Send a system message.
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn send_msg(&self, data: &impl Serialize) -> Result<Value> {
        self.data_call(&operations::SEND_MSG, data).await
    }

    /// Convert the state of documents.
    ///
    /// # Errors
    ///
    /// As [`save`](Self::save).
    pub async fn state_convert(&self, data: &impl Serialize) -> Result<Value> {
        self.data_call(&operations::STATE_CONVERT, data).await
    }
}
