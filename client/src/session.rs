//! Account session
//!
//! A [`Session`] is the public entry point: it stages table operations,
//! either as ready-to-submit single transactions or into a batch, and
//! commits batches through the [`Assembler`].
//!
//! Whether an operation is buffered is decided by the [`SubmissionMode`]
//! the session holds, never by the individual builder methods. The same
//! constructor validation runs in both modes.

use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use ledger_tables_core::error::to_decrypt_error;
use ledger_tables_core::utils::hex_to_string;
use ledger_tables_core::{
    decode_token, generate_token, sym_decrypt, Account, CreateOptions, FeeConfig, LedgerConfig, OpType,
    Permissions, ResolvedSecret, StatementEncoder, TableListSet, TableOperation,
};

use crate::assembler::{Assembler, CommitOptions};
use crate::error::{ClientError, Result};
use crate::rpc::{account_tables, fetch_user_token, table_auth, RpcAccessor, Signer, SubmitResult, Submitter};

/// Operations buffered between `begin_tran` and `commit`
#[derive(Debug, Clone, Default)]
pub struct Batch {
    operations: Vec<TableOperation>,
}

impl Batch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation, returning its position
    pub fn push(&mut self, op: TableOperation) -> usize {
        self.operations.push(op);
        self.operations.len() - 1
    }

    /// Buffered operations in insertion order
    pub fn operations(&self) -> &[TableOperation] {
        &self.operations
    }

    /// Number of buffered operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Consume the batch
    pub fn into_operations(self) -> Vec<TableOperation> {
        self.operations
    }
}

/// How builder calls are handled
#[derive(Debug, Clone, Default)]
pub enum SubmissionMode {
    /// Every operation becomes its own transaction
    #[default]
    Immediate,

    /// Operations are buffered until `commit`
    Buffered(Batch),
}

/// A single encoded operation, ready for [`Session::submit`]
#[derive(Debug, Clone)]
pub struct PendingOperation {
    operation: TableOperation,
    transaction: TableListSet,
}

impl PendingOperation {
    /// The validated operation
    pub fn operation(&self) -> &TableOperation {
        &self.operation
    }

    /// The encoded transaction
    pub fn transaction(&self) -> &TableListSet {
        &self.transaction
    }
}

/// Result of a builder call
#[derive(Debug, Clone)]
pub enum Staged {
    /// Appended to the active batch at `position`
    Buffered {
        /// Position in the batch
        position: usize,
    },

    /// Ready to submit on its own
    Ready(PendingOperation),
}

impl Staged {
    /// The pending operation, if this was staged in immediate mode
    pub fn into_pending(self) -> Option<PendingOperation> {
        match self {
            Staged::Ready(pending) => Some(pending),
            Staged::Buffered { .. } => None,
        }
    }
}

#[derive(Debug)]
struct SessionState {
    mode: SubmissionMode,
    owner: Option<String>,
    strict_mode: bool,
    need_verify: bool,
}

/// Clears the committing flag when the commit ends, however it ends
struct CommitGuard<'a>(&'a AtomicBool);

impl Drop for CommitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Table operations on behalf of one account
pub struct Session {
    account: Account,
    rpc: Arc<dyn RpcAccessor>,
    signer: Arc<dyn Signer>,
    submitter: Arc<dyn Submitter>,
    fee: FeeConfig,
    state: Mutex<SessionState>,
    committing: AtomicBool,
}

impl Session {
    /// Create a session for `account`
    pub fn new(
        account: Account,
        rpc: Arc<dyn RpcAccessor>,
        signer: Arc<dyn Signer>,
        submitter: Arc<dyn Submitter>,
        config: &LedgerConfig,
    ) -> Self {
        Self {
            account,
            rpc,
            signer,
            submitter,
            fee: config.fee.clone(),
            state: Mutex::new(SessionState {
                mode: SubmissionMode::Immediate,
                owner: None,
                strict_mode: config.strict_mode,
                need_verify: config.need_verify,
            }),
            committing: AtomicBool::new(false),
        }
    }

    /// The acting account
    pub fn account(&self) -> &Account {
        &self.account
    }

    fn ensure_not_committing(&self) -> Result<()> {
        if self.committing.load(Ordering::SeqCst) {
            return Err(ClientError::CommitInProgress);
        }
        Ok(())
    }

    fn assembler(&self) -> Assembler<'_> {
        Assembler::new(
            &self.account,
            self.rpc.as_ref(),
            self.signer.as_ref(),
            self.submitter.as_ref(),
            &self.fee,
        )
    }

    /// Start buffering operations, discarding any leftover batch
    pub async fn begin_tran(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        self.ensure_not_committing()?;

        if let SubmissionMode::Buffered(batch) = &state.mode {
            if !batch.is_empty() {
                warn!("Discarding {} uncommitted operation(s)", batch.len());
            }
        }

        state.mode = SubmissionMode::Buffered(Batch::new());
        debug!("Batch started for {}", self.account.address);
        Ok(())
    }

    /// Whether operations are currently being buffered
    pub async fn is_buffering(&self) -> bool {
        matches!(self.state.lock().await.mode, SubmissionMode::Buffered(_))
    }

    /// Number of operations in the active batch
    pub async fn buffered_len(&self) -> usize {
        match &self.state.lock().await.mode {
            SubmissionMode::Buffered(batch) => batch.len(),
            SubmissionMode::Immediate => 0,
        }
    }

    /// Act on tables owned by `owner` (or by the acting account when `None`)
    pub async fn use_owner(&self, owner: Option<String>) {
        self.state.lock().await.owner = owner;
    }

    /// Set the strict mode flag of committed transactions
    pub async fn set_strict_mode(&self, strict_mode: bool) {
        self.state.lock().await.strict_mode = strict_mode;
    }

    /// Set whether the ledger verifies committed transactions
    pub async fn set_need_verify(&self, need_verify: bool) {
        self.state.lock().await.need_verify = need_verify;
    }

    /// Create a table
    pub async fn create_table(&self, name: &str, raw: Value, options: CreateOptions) -> Result<Staged> {
        self.stage(TableOperation::create(name, raw, options)).await
    }

    /// Recreate a table
    pub async fn recreate_table(&self, name: &str) -> Result<Staged> {
        self.stage(TableOperation::recreate(name)).await
    }

    /// Drop a table
    pub async fn drop_table(&self, name: &str) -> Result<Staged> {
        self.stage(TableOperation::drop(name)).await
    }

    /// Rename a table
    pub async fn rename_table(&self, old_name: &str, new_name: &str) -> Result<Staged> {
        self.stage(TableOperation::rename(old_name, new_name)).await
    }

    /// Grant `user` permissions on a table
    pub async fn grant(
        &self,
        name: &str,
        user: &str,
        permissions: &Permissions,
        public_key: &str,
    ) -> Result<Staged> {
        self.stage(TableOperation::grant(name, user, permissions, public_key)).await
    }

    async fn stage(&self, op: ledger_tables_core::Result<TableOperation>) -> Result<Staged> {
        let op = op?;

        // Checked under the lock: commit sets the flag while holding it
        let mut state = self.state.lock().await;
        self.ensure_not_committing()?;
        let op = op.with_owner(state.owner.clone());

        if let SubmissionMode::Buffered(batch) = &mut state.mode {
            let position = batch.push(op);
            debug!("Buffered operation #{}", position);
            return Ok(Staged::Buffered { position });
        }
        drop(state);

        Ok(Staged::Ready(self.prepare(op)?))
    }

    fn prepare(&self, operation: TableOperation) -> Result<PendingOperation> {
        let secret = if operation.op_type() == OpType::Create && operation.confidential() {
            ResolvedSecret::Token(generate_token(self.account.secret())?)
        } else {
            ResolvedSecret::Plain
        };

        let statement = StatementEncoder::new(&self.account).encode(&operation, &secret)?;
        let mut transaction = TableListSet::new(&self.account.address, statement);
        if operation.op_type() == OpType::Create {
            transaction = transaction.with_confidential(operation.confidential());
        }

        Ok(PendingOperation { transaction, operation })
    }

    /// Submit an operation staged in immediate mode.
    ///
    /// Grants on a confidential table get the table key re-wrapped for the
    /// grantee first; grants on a plain table go out without a token.
    pub async fn submit(&self, pending: PendingOperation) -> Result<SubmitResult> {
        let transaction = if pending.operation.op_type() == OpType::Grant {
            self.attach_grant_token(pending).await?
        } else {
            pending.transaction
        };

        self.assembler().submit(transaction.to_value()?).await
    }

    async fn attach_grant_token(&self, pending: PendingOperation) -> Result<TableListSet> {
        let key = pending.operation.table_key(&self.account.address);
        let token = fetch_user_token(self.rpc.as_ref(), &key.owner, &self.account.address, &key.table_name)
            .await
            .map_err(|e| ClientError::TokenFetch(format!("{}: {}", key, e)))?;

        match ResolvedSecret::from_fetched(token) {
            ResolvedSecret::Plain => Ok(pending.transaction),
            secret => {
                let statement = StatementEncoder::new(&self.account).encode(&pending.operation, &secret)?;
                Ok(TableListSet::new(&self.account.address, statement))
            }
        }
    }

    /// Commit the active batch as one transaction.
    ///
    /// The batch is gone afterwards whether or not the commit succeeds.
    pub async fn commit(&self) -> Result<SubmitResult> {
        let (operations, options) = {
            let mut state = self.state.lock().await;
            self.ensure_not_committing()?;

            let batch = match mem::take(&mut state.mode) {
                SubmissionMode::Buffered(batch) => batch,
                SubmissionMode::Immediate => return Err(ClientError::NoActiveBatch),
            };

            self.committing.store(true, Ordering::SeqCst);
            let options = CommitOptions {
                strict_mode: state.strict_mode,
                need_verify: state.need_verify,
            };
            (batch.into_operations(), options)
        };
        let _guard = CommitGuard(&self.committing);

        self.assembler().commit(operations, options).await
    }

    /// Commit on the runtime and hand the result to `callback`
    pub fn commit_with_callback<F>(self: &Arc<Self>, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<SubmitResult>) + Send + 'static,
    {
        let session = Arc::clone(self);
        tokio::spawn(async move { callback(session.commit().await) })
    }

    /// Submit on the runtime and hand the result to `callback`
    pub fn submit_with_callback<F>(self: &Arc<Self>, pending: PendingOperation, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<SubmitResult>) + Send + 'static,
    {
        let session = Arc::clone(self);
        tokio::spawn(async move { callback(session.submit(pending).await) })
    }

    /// List the tables of an account
    pub async fn get_account_tables(&self, address: &str, detail: bool) -> Result<Value> {
        account_tables(self.rpc.as_ref(), address, detail).await
    }

    /// List the grants on a table, optionally restricted to `accounts`
    pub async fn get_table_auth(&self, owner: &str, table_name: &str, accounts: &[String]) -> Result<Value> {
        table_auth(self.rpc.as_ref(), owner, table_name, accounts).await
    }

    /// Decode a table's raw definition as stored on the ledger
    pub async fn read_table_raw(&self, owner: &str, table_name: &str, raw_hex: &str) -> Result<Value> {
        let token = fetch_user_token(self.rpc.as_ref(), owner, &self.account.address, table_name)
            .await
            .map_err(|e| ClientError::TokenFetch(format!("{}/{}: {}", owner, table_name, e)))?;

        let json = match ResolvedSecret::from_fetched(token) {
            ResolvedSecret::Plain => hex_to_string(raw_hex)?,
            ResolvedSecret::Token(token) => {
                let key = decode_token(&self.account, &token)?;
                let plain = sym_decrypt(&key, raw_hex, self.account.cipher_suite)?;
                String::from_utf8(plain).map_err(to_decrypt_error)?
            }
        };

        info!("Read raw definition of {}/{}", owner, table_name);
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::rpc::{ACCOUNT_TABLES_COMMAND, PREPARE_COMMAND, TABLE_AUTH_COMMAND, USER_TOKEN_COMMAND};
    use crate::testing::{decode_statements, GatedLedger, SpyLedger, SpySigner, SpySubmitter};
    use ledger_tables_core::utils::string_to_hex;
    use serde_json::json;
    use ledger_tables_core::{sym_encrypt, CipherSuite, GeneratedAccount, Token};

    struct Fixture {
        session: Arc<Session>,
        ledger: Arc<SpyLedger>,
        signer: Arc<SpySigner>,
        submitter: Arc<SpySubmitter>,
    }

    fn fixture_with(ledger: SpyLedger, submitter: SpySubmitter) -> Fixture {
        let account = Account::from_secret("alice-secret", CipherSuite::Aes256Gcm).unwrap();
        let ledger = Arc::new(ledger);
        let signer = Arc::new(SpySigner::new());
        let submitter = Arc::new(submitter);

        let session = Session::new(
            account,
            ledger.clone(),
            signer.clone(),
            submitter.clone(),
            &LedgerConfig::testing(),
        );

        Fixture { session: Arc::new(session), ledger, signer, submitter }
    }

    fn fixture() -> Fixture {
        fixture_with(SpyLedger::new(), SpySubmitter::accepting())
    }

    fn schema() -> Value {
        json!([{"field": "id", "type": "int", "PK": 1}])
    }

    #[tokio::test]
    async fn test_key_mismatch_makes_no_calls() {
        let f = fixture();
        let bob = GeneratedAccount::generate().unwrap();
        let carol = GeneratedAccount::generate().unwrap();

        let err = f
            .session
            .grant("t1", &bob.address, &Permissions::all(), &carol.public_key)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyMismatchError);

        f.session.begin_tran().await.unwrap();
        let err = f
            .session
            .grant("t1", &bob.address, &Permissions::all(), &carol.public_key)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyMismatchError);
        assert_eq!(f.session.buffered_len().await, 0);

        assert!(f.ledger.calls().is_empty());
        assert!(f.signer.signed().is_empty());
    }

    #[tokio::test]
    async fn test_builders_buffer_inside_a_batch() {
        let f = fixture();
        f.session.begin_tran().await.unwrap();

        let staged = f.session.create_table("t1", schema(), CreateOptions::confidential()).await.unwrap();
        assert!(matches!(staged, Staged::Buffered { position: 0 }));
        let staged = f.session.drop_table("t2").await.unwrap();
        assert!(matches!(staged, Staged::Buffered { position: 1 }));

        assert!(f.session.is_buffering().await);
        assert!(f.ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_commit_clears_batch_on_success() {
        let f = fixture();
        let bob = GeneratedAccount::generate().unwrap();

        f.session.begin_tran().await.unwrap();
        f.session.create_table("t1", schema(), CreateOptions::confidential()).await.unwrap();
        f.session.grant("t1", &bob.address, &Permissions::read_only(), &bob.public_key).await.unwrap();

        let result = f.session.commit().await.unwrap();
        assert!(result.is_success());

        assert!(!f.session.is_buffering().await);
        assert_eq!(f.session.buffered_len().await, 0);
        assert_eq!(decode_statements(&f.signer.signed()[0]).len(), 2);
    }

    #[tokio::test]
    async fn test_commit_clears_batch_on_failure() {
        let f = fixture_with(SpyLedger::new().failing_prepare(), SpySubmitter::accepting());

        f.session.begin_tran().await.unwrap();
        f.session.drop_table("t1").await.unwrap();

        let err = f.session.commit().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SkeletonRequestError);
        assert!(!f.session.is_buffering().await);

        let err = f.session.commit().await.unwrap_err();
        assert!(matches!(err, ClientError::NoActiveBatch));
    }

    #[tokio::test]
    async fn test_commit_without_batch() {
        let f = fixture();
        assert!(matches!(f.session.commit().await.unwrap_err(), ClientError::NoActiveBatch));
        assert!(f.ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_begin_tran_discards_leftovers() {
        let f = fixture();
        f.session.begin_tran().await.unwrap();
        f.session.drop_table("t1").await.unwrap();
        f.session.begin_tran().await.unwrap();
        assert_eq!(f.session.buffered_len().await, 0);

        f.session.commit().await.unwrap();
        assert!(decode_statements(&f.signer.signed()[0]).is_empty());
    }

    #[tokio::test]
    async fn test_commit_in_progress_is_rejected() {
        let f = fixture();
        f.session.begin_tran().await.unwrap();

        f.session.committing.store(true, Ordering::SeqCst);
        assert!(matches!(f.session.commit().await.unwrap_err(), ClientError::CommitInProgress));
        assert!(matches!(f.session.begin_tran().await.unwrap_err(), ClientError::CommitInProgress));
        assert!(matches!(
            f.session.drop_table("t1").await.unwrap_err(),
            ClientError::CommitInProgress
        ));

        // The rejected commit must not have consumed the batch
        f.session.committing.store(false, Ordering::SeqCst);
        assert!(f.session.is_buffering().await);
        f.session.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_running_commit_locks_out_batch_calls() {
        let account = Account::from_secret("alice-secret", CipherSuite::Aes256Gcm).unwrap();
        let ledger = Arc::new(GatedLedger::new());
        let session = Arc::new(Session::new(
            account,
            ledger.clone(),
            Arc::new(SpySigner::new()),
            Arc::new(SpySubmitter::accepting()),
            &LedgerConfig::testing(),
        ));
        session.begin_tran().await.unwrap();
        session.drop_table("t1").await.unwrap();

        // Queue the commit and both batch calls behind the state lock
        let state = session.state.lock().await;
        let commit = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.commit().await }
        });
        tokio::task::yield_now().await;

        let begin = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.begin_tran().await }
        });
        let stage = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.drop_table("t2").await }
        });
        tokio::task::yield_now().await;
        drop(state);

        ledger.wait_for_prepare().await;
        assert!(matches!(begin.await.unwrap().unwrap_err(), ClientError::CommitInProgress));
        assert!(matches!(stage.await.unwrap().unwrap_err(), ClientError::CommitInProgress));

        ledger.release();
        commit.await.unwrap().unwrap();
        assert!(!session.is_buffering().await);
        assert_eq!(ledger.inner().count(PREPARE_COMMAND), 1);
    }

    #[tokio::test]
    async fn test_owner_applies_to_lookups() {
        let f = fixture_with(
            SpyLedger::new().with_token("zcarol", "shared", ""),
            SpySubmitter::accepting(),
        );
        let bob = GeneratedAccount::generate().unwrap();

        f.session.use_owner(Some("zcarol".to_string())).await;
        f.session.begin_tran().await.unwrap();
        f.session.grant("shared", &bob.address, &Permissions::all(), &bob.public_key).await.unwrap();
        f.session.commit().await.unwrap();

        let lookups: Vec<Value> = f
            .ledger
            .calls()
            .into_iter()
            .filter(|(command, _)| command == USER_TOKEN_COMMAND)
            .map(|(_, params)| params)
            .collect();
        assert_eq!(lookups.len(), 1);
        assert_eq!(lookups[0]["owner"], "zcarol");

        // Unencrypted table: flags go out as plain hex, no token
        let statements = decode_statements(&f.signer.signed()[0]);
        assert_eq!(statements[0].token, None);
    }

    #[tokio::test]
    async fn test_immediate_confidential_create() {
        let f = fixture();

        let pending = f
            .session
            .create_table("t1", schema(), CreateOptions::confidential())
            .await
            .unwrap()
            .into_pending()
            .unwrap();

        let tx = pending.transaction();
        let token = Token::from_hex(tx.statement.token.clone().unwrap());
        let key = decode_token(f.session.account(), &token).unwrap();
        let raw = tx.statement.raw.clone().unwrap();
        assert_eq!(
            String::from_utf8(sym_decrypt(&key, &raw, CipherSuite::Aes256Gcm).unwrap()).unwrap(),
            schema().to_string()
        );

        f.session.submit(pending).await.unwrap();
        let prepared = f.ledger.last_prepared().unwrap();
        assert_eq!(prepared["TransactionType"], "TableListSet");
        assert_eq!(prepared["OpType"], 1);
        assert_eq!(prepared["Confidential"], true);
        assert_eq!(f.submitter.blobs().len(), 1);

        let pending = f.session.drop_table("t1").await.unwrap().into_pending().unwrap();
        assert_eq!(pending.transaction().confidential, None);
    }

    #[tokio::test]
    async fn test_immediate_grant_rewraps_own_token() {
        let alice = Account::from_secret("alice-secret", CipherSuite::Aes256Gcm).unwrap();
        let own_token = generate_token(alice.secret()).unwrap();
        let f = fixture_with(
            SpyLedger::new().with_token(&alice.address, "t1", own_token.as_str()),
            SpySubmitter::accepting(),
        );
        let bob = GeneratedAccount::generate().unwrap();
        let bob_account = Account::from_secret(bob.secret.clone(), CipherSuite::Aes256Gcm).unwrap();

        let pending = f
            .session
            .grant("t1", &bob.address, &Permissions::read_only(), &bob.public_key)
            .await
            .unwrap()
            .into_pending()
            .unwrap();
        assert_eq!(pending.transaction().statement.token, None);
        assert!(f.ledger.calls().is_empty());

        f.session.submit(pending).await.unwrap();
        assert_eq!(f.ledger.count(USER_TOKEN_COMMAND), 1);

        let prepared = f.ledger.last_prepared().unwrap();
        let grant_token = Token::from_hex(prepared["Token"].as_str().unwrap());
        assert_eq!(
            decode_token(&bob_account, &grant_token).unwrap(),
            decode_token(&alice, &own_token).unwrap()
        );
    }

    #[tokio::test]
    async fn test_callback_adapter() {
        let f = fixture();
        f.session.begin_tran().await.unwrap();
        f.session.rename_table("t1", "t2").await.unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel();
        f.session
            .commit_with_callback(move |result| {
                let _ = tx.send(result.map(|r| r.result_code));
            })
            .await
            .unwrap();

        assert_eq!(rx.await.unwrap().unwrap(), "tesSUCCESS");
        assert_eq!(f.ledger.count(PREPARE_COMMAND), 1);
    }

    #[tokio::test]
    async fn test_read_table_raw() {
        let alice = Account::from_secret("alice-secret", CipherSuite::Aes256Gcm).unwrap();
        let token = generate_token(alice.secret()).unwrap();
        let key = decode_token(&alice, &token).unwrap();
        let encrypted = sym_encrypt(&key, schema().to_string().as_bytes(), CipherSuite::Aes256Gcm).unwrap();

        let f = fixture_with(
            SpyLedger::new().with_token("zowner", "secret_t", token.as_str()),
            SpySubmitter::accepting(),
        );

        let value = f.session.read_table_raw("zowner", "secret_t", &encrypted).await.unwrap();
        assert_eq!(value, schema());

        let plain = string_to_hex(&schema().to_string());
        let value = f.session.read_table_raw("zowner", "open_t", &plain).await.unwrap();
        assert_eq!(value, schema());
    }

    #[tokio::test]
    async fn test_read_helpers_forward_params() {
        let f = fixture();
        f.session.get_account_tables("zalice", true).await.unwrap();
        f.session.get_table_auth("zalice", "t1", &["zbob".to_string()]).await.unwrap();

        let calls = f.ledger.calls();
        assert_eq!(calls[0], (ACCOUNT_TABLES_COMMAND.to_string(), json!({"account": "zalice", "detail": true})));
        assert_eq!(
            calls[1],
            (
                TABLE_AUTH_COMMAND.to_string(),
                json!({"owner": "zalice", "tablename": "t1", "accounts": ["zbob"]})
            )
        );
    }
}
