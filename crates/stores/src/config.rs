//! Configuration store: the banner and payment-instruction singletons.
//!
//! Each document is patched one field at a time through a closed edit enum
//! and persisted whole. Values are free text; format validation is left to
//! the editing UI.

use std::sync::Arc;

use storage::{keys, Storage};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{GlobalConfig, PaymentConfig};
use crate::seed;

/// One editable field of [`GlobalConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalConfigEdit {
    SetPromoText(String),
    SetPromoCode(String),
    SetPromoDetail(String),
    SetShowBanner(bool),
    SetMaintenanceMode(bool),
}

/// One editable field of [`PaymentConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentConfigEdit {
    SetWhatsappNumber(String),
    SetQrImageUrl(String),
    SetPrimaryWalletNumber(String),
    SetSecondaryWalletNumber(String),
    SetBankName(String),
    SetBankAccountType(String),
    SetBankAccountNumber(String),
    SetBankAccountHolder(String),
}

/// Store owning both configuration singletons.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    storage: Storage,
    global: Arc<RwLock<GlobalConfig>>,
    payment: Arc<RwLock<PaymentConfig>>,
}

impl ConfigStore {
    /// Load both documents, seeding defaults where missing.
    pub async fn load_or_seed(storage: Storage) -> Result<Self> {
        let global = match storage.load::<GlobalConfig>(keys::GLOBAL_CONFIG).await? {
            Some(config) => config,
            None => {
                let config = seed::default_global_config();
                storage.save(keys::GLOBAL_CONFIG, &config).await?;
                config
            }
        };

        let payment = match storage.load::<PaymentConfig>(keys::PAYMENT_CONFIG).await? {
            Some(config) => config,
            None => {
                let config = seed::default_payment_config();
                storage.save(keys::PAYMENT_CONFIG, &config).await?;
                config
            }
        };

        Ok(Self {
            storage,
            global: Arc::new(RwLock::new(global)),
            payment: Arc::new(RwLock::new(payment)),
        })
    }

    /// Current banner configuration.
    pub async fn global(&self) -> GlobalConfig {
        self.global.read().await.clone()
    }

    /// Current payment instructions.
    pub async fn payment(&self) -> PaymentConfig {
        self.payment.read().await.clone()
    }

    /// Patch one banner field and persist the whole document.
    pub async fn apply_global(&self, edit: GlobalConfigEdit) -> Result<()> {
        let mut config = self.global.write().await;
        match edit {
            GlobalConfigEdit::SetPromoText(v) => config.promo_text = v,
            GlobalConfigEdit::SetPromoCode(v) => config.promo_code = v,
            GlobalConfigEdit::SetPromoDetail(v) => config.promo_detail = v,
            GlobalConfigEdit::SetShowBanner(v) => config.show_banner = v,
            GlobalConfigEdit::SetMaintenanceMode(v) => config.maintenance_mode = v,
        }
        self.storage.save(keys::GLOBAL_CONFIG, &*config).await?;
        Ok(())
    }

    /// Patch one payment field and persist the whole document.
    pub async fn apply_payment(&self, edit: PaymentConfigEdit) -> Result<()> {
        let mut config = self.payment.write().await;
        match edit {
            PaymentConfigEdit::SetWhatsappNumber(v) => config.whatsapp_number = v,
            PaymentConfigEdit::SetQrImageUrl(v) => config.qr_image_url = v,
            PaymentConfigEdit::SetPrimaryWalletNumber(v) => config.primary_wallet_number = v,
            PaymentConfigEdit::SetSecondaryWalletNumber(v) => config.secondary_wallet_number = v,
            PaymentConfigEdit::SetBankName(v) => config.bank_name = v,
            PaymentConfigEdit::SetBankAccountType(v) => config.bank_account_type = v,
            PaymentConfigEdit::SetBankAccountNumber(v) => config.bank_account_number = v,
            PaymentConfigEdit::SetBankAccountHolder(v) => config.bank_account_holder = v,
        }
        self.storage.save(keys::PAYMENT_CONFIG, &*config).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_storage() -> Storage {
        let storage = Storage::connect("sqlite::memory:").await.unwrap();
        storage.migrate().await.unwrap();
        storage
    }

    #[tokio::test]
    async fn test_seeds_defaults() {
        let config = ConfigStore::load_or_seed(test_storage().await).await.unwrap();
        assert!(config.global().await.show_banner);
        assert!(!config.global().await.maintenance_mode);
        assert!(!config.payment().await.whatsapp_number.is_empty());
    }

    #[tokio::test]
    async fn test_edit_patches_one_field_and_persists() {
        let storage = test_storage().await;
        let config = ConfigStore::load_or_seed(storage.clone()).await.unwrap();
        let before = config.global().await;

        config
            .apply_global(GlobalConfigEdit::SetPromoCode("SUMMER10".to_string()))
            .await
            .unwrap();

        let after = config.global().await;
        assert_eq!(after.promo_code, "SUMMER10");
        assert_eq!(after.promo_text, before.promo_text);
        assert_eq!(after.show_banner, before.show_banner);

        let reloaded = ConfigStore::load_or_seed(storage).await.unwrap();
        assert_eq!(reloaded.global().await.promo_code, "SUMMER10");
    }

    #[tokio::test]
    async fn test_payment_edit_round_trips() {
        let storage = test_storage().await;
        let config = ConfigStore::load_or_seed(storage.clone()).await.unwrap();

        config
            .apply_payment(PaymentConfigEdit::SetWhatsappNumber("5730000000".to_string()))
            .await
            .unwrap();
        config
            .apply_payment(PaymentConfigEdit::SetBankName("Davivienda".to_string()))
            .await
            .unwrap();

        let reloaded = ConfigStore::load_or_seed(storage).await.unwrap();
        let payment = reloaded.payment().await;
        assert_eq!(payment.whatsapp_number, "5730000000");
        assert_eq!(payment.bank_name, "Davivienda");
    }
}
