//! Service facade: validates requests and persists them into the stores.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;

use moneyflow_accounts::{
    AccountDeposit, BalanceSnapshot, DepositInput, Transaction, TransferRequest,
    TransferRequestBuilder, validate_iban,
};
use moneyflow_core::{
    Clock, DepositSignature, DomainError, DomainResult, Entity, SystemClock, TransferCode,
};

use crate::config::StoreConfig;
use crate::store::{JsonFileStore, RecordStore};

/// The four stores the manager reads and writes.
#[derive(Clone)]
pub struct AccountStores {
    pub transfers: Arc<dyn RecordStore<TransferRequest>>,
    pub deposits: Arc<dyn RecordStore<AccountDeposit>>,
    pub transactions: Arc<dyn RecordStore<Transaction>>,
    pub balances: Arc<dyn RecordStore<BalanceSnapshot>>,
}

impl AccountStores {
    /// JSON file stores at the configured paths. Only the transactions store is
    /// required to exist.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            transfers: Arc::new(JsonFileStore::<TransferRequest>::optional(&config.transfers)),
            deposits: Arc::new(JsonFileStore::<AccountDeposit>::optional(&config.deposits)),
            transactions: Arc::new(JsonFileStore::<Transaction>::required(&config.transactions)),
            balances: Arc::new(JsonFileStore::<BalanceSnapshot>::optional(&config.balances)),
        }
    }
}

/// Entry point for transfer requests, deposits and balance snapshots.
///
/// Single-threaded by contract: each call is a blocking read-modify-write on one
/// store, with no locking across calls.
pub struct AccountManager {
    stores: AccountStores,
    clock: Arc<dyn Clock>,
}

impl AccountManager {
    pub fn new(stores: AccountStores, clock: Arc<dyn Clock>) -> Self {
        Self { stores, clock }
    }

    /// File-backed manager on the wall clock.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(AccountStores::from_config(config), Arc::new(SystemClock))
    }

    /// Validate and persist a transfer request; returns its transfer code.
    pub fn transfer_request(
        &self,
        from_iban: &str,
        to_iban: &str,
        concept: &str,
        transfer_type: &str,
        date: &str,
        amount: Decimal,
    ) -> DomainResult<TransferCode> {
        self.submit_transfer(
            TransferRequest::builder()
                .from_iban(from_iban)
                .to_iban(to_iban)
                .concept(concept)
                .transfer_type(transfer_type)
                .date(date)
                .amount(amount),
        )
    }

    /// Same as [`transfer_request`](Self::transfer_request) for a prepared builder.
    pub fn submit_transfer(&self, builder: TransferRequestBuilder) -> DomainResult<TransferCode> {
        let request = builder.build(self.clock.as_ref()).inspect_err(log_rejection)?;

        let mut stored = self.stores.transfers.load()?;
        if let Some(existing) = stored.iter().find(|t| t.same_fields_as(&request)) {
            tracing::warn!(
                kind = TransferRequest::KIND,
                existing = %existing.id(),
                "duplicate transfer rejected"
            );
            return Err(DomainError::duplicate(existing.id().to_string()));
        }

        let code = request.id().clone();
        stored.push(request);
        self.stores.transfers.save(&stored)?;

        tracing::info!(
            kind = TransferRequest::KIND,
            id = %code,
            store = %self.stores.transfers.location(),
            "record persisted"
        );
        Ok(code)
    }

    /// Read a deposit submission file, validate it and append the deposit.
    pub fn deposit_into_account(&self, input_file: impl AsRef<Path>) -> DomainResult<DepositSignature> {
        let path = input_file.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                DomainError::deposit_input(format!("file input not found: {}", path.display()))
            }
            _ => DomainError::deposit_input(format!("{}: {e}", path.display())),
        })?;

        let input = DepositInput::from_json(&raw)?;
        let deposit =
            AccountDeposit::from_input(&input, self.clock.as_ref()).inspect_err(log_rejection)?;
        let signature = deposit.id().clone();
        self.stores.deposits.append_and_save(deposit)?;

        tracing::info!(
            kind = AccountDeposit::KIND,
            id = %signature,
            store = %self.stores.deposits.location(),
            "record persisted"
        );
        Ok(signature)
    }

    /// Sum the transaction log for `iban` and append the resulting snapshot.
    pub fn calculate_balance(&self, iban: &str) -> DomainResult<BalanceSnapshot> {
        let iban = validate_iban(iban).inspect_err(log_rejection)?;
        let transactions = self.stores.transactions.load()?;

        let snapshot = BalanceSnapshot::compute(&iban, &transactions, self.clock.as_ref())
            .inspect_err(|e| {
                if matches!(e, DomainError::IbanNotFound(_)) {
                    tracing::warn!(%iban, entries = transactions.len(), "no transactions for IBAN");
                }
            })?;

        self.stores.balances.append_and_save(snapshot.clone())?;

        tracing::info!(
            %iban,
            balance = %snapshot.balance(),
            store = %self.stores.balances.location(),
            "balance snapshot persisted"
        );
        Ok(snapshot)
    }
}

/// Field validation failures are caller input problems, logged below warn.
fn log_rejection(err: &DomainError) {
    if err.is_validation() {
        tracing::info!(reason = %err, "input rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use moneyflow_core::FixedClock;

    const FROM: &str = "ES9121000418450200051332";
    const TO: &str = "ES7921000813610123456789";

    struct Fixture {
        manager: AccountManager,
        transfers: Arc<InMemoryStore<TransferRequest>>,
        balances: Arc<InMemoryStore<BalanceSnapshot>>,
    }

    fn fixture(transactions: InMemoryStore<Transaction>) -> Fixture {
        let transfers: Arc<InMemoryStore<TransferRequest>> = Arc::new(InMemoryStore::new("transfers"));
        let balances: Arc<InMemoryStore<BalanceSnapshot>> = Arc::new(InMemoryStore::new("balances"));
        let stores = AccountStores {
            transfers: transfers.clone(),
            deposits: Arc::new(InMemoryStore::<AccountDeposit>::new("deposits")),
            transactions: Arc::new(transactions),
            balances: balances.clone(),
        };
        let clock = Arc::new(FixedClock::at_date(2026, 10, 16).unwrap());
        Fixture {
            manager: AccountManager::new(stores, clock),
            transfers,
            balances,
        }
    }

    fn request(manager: &AccountManager) -> DomainResult<TransferCode> {
        manager.transfer_request(
            FROM,
            TO,
            "Rent for March",
            "URGENT",
            "16/10/2026",
            Decimal::new(1000, 2),
        )
    }

    #[test]
    fn second_identical_request_is_a_duplicate() {
        let fx = fixture(InMemoryStore::new("transactions"));
        let code = request(&fx.manager).unwrap();

        let err = request(&fx.manager).unwrap_err();
        assert_eq!(err, DomainError::DuplicateRequest(code.to_string()));
        assert_eq!(fx.transfers.load().unwrap().len(), 1);
    }

    #[test]
    fn rejected_request_persists_nothing() {
        let fx = fixture(InMemoryStore::new("transactions"));
        let err = fx
            .manager
            .transfer_request(FROM, TO, "Rent", "URGENT", "16/10/2026", Decimal::new(10, 0))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidConcept(_)));
        assert!(fx.transfers.load().unwrap().is_empty());
    }

    #[test]
    fn balance_requires_transaction_log() {
        let fx = fixture(InMemoryStore::absent("transactions"));
        assert!(matches!(
            fx.manager.calculate_balance(FROM),
            Err(DomainError::StoreNotFound(_))
        ));
        assert!(fx.balances.load().unwrap().is_empty());
    }

    #[test]
    fn balance_snapshots_accumulate() {
        let log = vec![
            Transaction {
                iban: FROM.to_string(),
                amount: Decimal::new(1000, 1),
            },
            Transaction {
                iban: FROM.to_string(),
                amount: Decimal::new(-300, 1),
            },
        ];
        let fx = fixture(InMemoryStore::with_records("transactions", log));

        let first = fx.manager.calculate_balance(FROM).unwrap();
        let second = fx.manager.calculate_balance(FROM).unwrap();
        assert_eq!(first.balance(), Decimal::new(70, 0));
        assert_eq!(fx.balances.load().unwrap(), vec![first, second]);

        assert!(matches!(
            fx.manager.calculate_balance(TO),
            Err(DomainError::IbanNotFound(_))
        ));
        assert_eq!(fx.balances.load().unwrap().len(), 2);
    }

    #[test]
    fn overflowing_log_fails_without_snapshot() {
        let huge: Decimal = "70000000000000000000000000000".parse().unwrap();
        let log = vec![
            Transaction {
                iban: FROM.to_string(),
                amount: huge,
            },
            Transaction {
                iban: FROM.to_string(),
                amount: huge,
            },
        ];
        let fx = fixture(InMemoryStore::with_records("transactions", log));

        assert!(matches!(
            fx.manager.calculate_balance(FROM),
            Err(DomainError::StoreCorrupt(_))
        ));
        assert!(fx.balances.load().unwrap().is_empty());
    }

    #[test]
    fn invalid_iban_is_a_validation_failure() {
        let fx = fixture(InMemoryStore::new("transactions"));
        let err = fx.manager.calculate_balance("ES00").unwrap_err();
        assert!(err.is_validation());
    }
}
