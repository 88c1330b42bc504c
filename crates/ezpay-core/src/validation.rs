//! Input checks performed before a transfer reaches a registry
//!
//! These mirror the transfer and PIN-entry forms: each validator names
//! the offending field so the caller can show it next to the input.

use once_cell::sync::OnceCell;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::models::{Counterparty, NewTransaction};
use crate::types::TransferKind;

pub fn validate_upi_id(upi_id: &str) -> CoreResult<()> {
    static UPI_ID: OnceCell<Regex> = OnceCell::new();
    let upi_regex = UPI_ID.get_or_init(|| Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z]{2,}$").unwrap());
    if upi_regex.is_match(upi_id) {
        Ok(())
    } else {
        Err(CoreError::validation(
            "upiId",
            "UPI ID must look like username@bankname",
        ))
    }
}

/// 10 to 18 digits
pub fn validate_account_number(account: &str) -> CoreResult<()> {
    static ACCOUNT_NUMBER: OnceCell<Regex> = OnceCell::new();
    let account_regex = ACCOUNT_NUMBER.get_or_init(|| Regex::new(r"^\d{10,18}$").unwrap());
    if account_regex.is_match(account) {
        Ok(())
    } else {
        Err(CoreError::validation(
            "recipientAccountNumber",
            "Account number must be 10 to 18 digits",
        ))
    }
}

pub fn validate_account_confirmation(account: &str, confirmation: &str) -> CoreResult<()> {
    if account == confirmation {
        Ok(())
    } else {
        Err(CoreError::validation(
            "confirmAccountNumber",
            "Account numbers do not match",
        ))
    }
}

/// Four uppercase letters, a zero, then six alphanumerics
pub fn validate_ifsc(ifsc: &str) -> CoreResult<()> {
    static IFSC: OnceCell<Regex> = OnceCell::new();
    let ifsc_regex = IFSC.get_or_init(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").unwrap());
    if ifsc_regex.is_match(ifsc) {
        Ok(())
    } else {
        Err(CoreError::validation(
            "ifscCode",
            "IFSC code must match AAAA0XXXXXX",
        ))
    }
}

pub fn validate_recipient_name(name: &str) -> CoreResult<()> {
    if name.trim().is_empty() {
        Err(CoreError::validation("recipientName", "Recipient name is required"))
    } else {
        Ok(())
    }
}

pub fn validate_amount(amount: Decimal) -> CoreResult<()> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(CoreError::validation("amount", "Amount must be greater than zero"))
    }
}

/// Exactly four ASCII digits
pub fn validate_pin(pin: &str) -> CoreResult<()> {
    if pin.len() == 4 && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(CoreError::validation("pin", "Please enter a valid 4-digit PIN"))
    }
}

/// Full form check for a new transfer on the `kind` rail
pub fn validate_new_transaction(new: &NewTransaction, kind: TransferKind) -> CoreResult<()> {
    if new.counterparty.kind() != kind {
        return Err(CoreError::validation(
            "counterparty",
            format!("Expected a {} counterparty", kind),
        ));
    }

    match &new.counterparty {
        Counterparty::Upi { upi_id, sender_upi_id } => {
            validate_upi_id(upi_id)?;
            if let Some(sender) = sender_upi_id {
                validate_upi_id(sender).map_err(|_| {
                    CoreError::validation("senderUpiId", "Sender UPI ID is malformed")
                })?;
            }
        }
        Counterparty::Bank {
            recipient_account_number,
            ifsc_code,
            recipient_name,
            sender_account_number,
        } => {
            validate_account_number(recipient_account_number)?;
            validate_ifsc(ifsc_code)?;
            validate_recipient_name(recipient_name)?;
            if let Some(sender) = sender_account_number {
                validate_account_number(sender).map_err(|_| {
                    CoreError::validation(
                        "senderAccountNumber",
                        "Sender account number must be 10 to 18 digits",
                    )
                })?;
            }
        }
    }

    validate_amount(new.amount)
}
