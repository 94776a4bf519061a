//! Employee model and related types.
//!
//! Employees are owned by the organization and are read-only to this engine.
//! This module defines the [`Employee`] struct together with the enums that
//! describe how the employee is paid.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The role an employee fills in the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    /// Door and floor security.
    Security,
    /// Table service.
    Waiter,
    /// Register and cash handling.
    Cashier,
    /// Bar service.
    Bartender,
    /// Head of kitchen.
    Chef,
    /// Kitchen assistant.
    ChefAssistant,
    /// Stock room.
    Stocker,
    /// Building and equipment maintenance.
    Maintenance,
    /// Floor or venue manager.
    Manager,
    /// Back-office administration.
    Admin,
    /// Front-of-house host.
    Host,
    /// Music.
    Dj,
}

/// Whether an employee is currently employed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed and included in reporting runs.
    #[default]
    Active,
    /// No longer employed.
    Inactive,
}

/// How an employee's base pay is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Paid per hour worked.
    #[default]
    Hourly,
    /// Paid a fixed salary per period, plus any overtime.
    Salaried,
}

/// The premium applied to overtime hours when an employee is paid overtime.
///
/// # Example
///
/// ```
/// use payroll_engine::models::OvertimeRate;
/// use rust_decimal::Decimal;
///
/// assert_eq!(OvertimeRate::FiftyPercent.multiplier(), Decimal::new(5, 1));
/// assert_eq!(OvertimeRate::OneHundredPercent.multiplier(), Decimal::ONE);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeRate {
    /// Time-and-a-half: overtime hours earn the rate plus 50%.
    #[default]
    FiftyPercent,
    /// Double time: overtime hours earn the rate plus 100%.
    OneHundredPercent,
}

impl OvertimeRate {
    /// Returns the premium on top of the plain rate (0.5 or 1.0).
    pub fn multiplier(&self) -> Decimal {
        match self {
            OvertimeRate::FiftyPercent => Decimal::new(5, 1),
            OvertimeRate::OneHundredPercent => Decimal::ONE,
        }
    }
}

/// The type of a bank account used for transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankAccountType {
    /// A checking (current) account.
    Checking,
    /// A savings account.
    Savings,
}

/// How an employee receives their pay.
///
/// Each variant carries only the fields it needs. The serialized form is
/// flattened with a `type` discriminant so storage layers can keep one table.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PaymentMethod;
///
/// let method: PaymentMethod =
///     serde_json::from_str(r#"{"type": "mobile_wallet", "phone_number": "+507 6000-0000"}"#).unwrap();
/// assert!(method.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Transfer to a bank account.
    BankTransfer {
        /// The name of the receiving bank.
        #[serde(default)]
        bank_name: String,
        /// The receiving account number.
        #[serde(default)]
        account_number: String,
        /// The kind of account.
        #[serde(default)]
        account_type: Option<BankAccountType>,
    },
    /// Transfer to a phone-number based wallet.
    MobileWallet {
        /// The phone number the wallet is registered to.
        #[serde(default)]
        phone_number: String,
    },
    /// Paid in cash.
    Cash,
}

impl PaymentMethod {
    /// Returns the snake_case name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer { .. } => "bank_transfer",
            PaymentMethod::MobileWallet { .. } => "mobile_wallet",
            PaymentMethod::Cash => "cash",
        }
    }

    /// Checks that the variant carries every field it requires.
    pub fn validate(&self) -> EngineResult<()> {
        let missing = |message: &str| EngineError::InvalidPaymentMethod {
            method: self.kind().to_string(),
            message: message.to_string(),
        };

        match self {
            PaymentMethod::BankTransfer {
                bank_name,
                account_number,
                account_type,
            } => {
                if bank_name.trim().is_empty() {
                    return Err(missing("bank name is required"));
                }
                if account_number.trim().is_empty() {
                    return Err(missing("account number is required"));
                }
                if account_type.is_none() {
                    return Err(missing("account type is required"));
                }
                Ok(())
            }
            PaymentMethod::MobileWallet { phone_number } => {
                if phone_number.trim().is_empty() {
                    return Err(missing("phone number is required"));
                }
                Ok(())
            }
            PaymentMethod::Cash => Ok(()),
        }
    }
}

/// An employee of the organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Full name, used on report lines.
    pub name: String,
    /// Address report notifications are sent to.
    pub email: String,
    /// The employee's role.
    pub role: EmployeeRole,
    /// Whether base pay is hourly or a fixed salary.
    #[serde(default)]
    pub payment_type: PaymentType,
    /// Hourly rate, also the base for overtime on salaried employees.
    pub hourly_rate: Decimal,
    /// Fixed salary component for salaried employees.
    #[serde(default)]
    pub salary: Option<Decimal>,
    /// Whether overtime hours earn a premium.
    #[serde(default)]
    pub pays_overtime: bool,
    /// The premium applied when overtime is paid.
    #[serde(default)]
    pub overtime_rate: OvertimeRate,
    /// How the employee is paid out.
    pub payment_method: PaymentMethod,
    /// Whether the employee is currently employed.
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns true if the employee is active.
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Returns true if the employee is paid by the hour.
    pub fn is_hourly(&self) -> bool {
        self.payment_type == PaymentType::Hourly
    }

    /// Checks the employee record for contract violations.
    ///
    /// The hourly rate must not be negative, salaried employees need a
    /// salary, and the payment method must carry its required fields.
    pub fn validate(&self) -> EngineResult<()> {
        if self.hourly_rate < Decimal::ZERO {
            return Err(EngineError::InvalidPayInput {
                field: "hourly_rate".to_string(),
                message: format!("employee '{}' has a negative hourly rate", self.id),
            });
        }
        if self.payment_type == PaymentType::Salaried && self.salary.is_none() {
            return Err(EngineError::InvalidPayInput {
                field: "salary".to_string(),
                message: format!("salaried employee '{}' has no salary", self.id),
            });
        }
        self.payment_method.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Ana Ruiz".to_string(),
            email: "ana@example.com".to_string(),
            role: EmployeeRole::Bartender,
            payment_type: PaymentType::Hourly,
            hourly_rate: dec("10.00"),
            salary: None,
            pays_overtime: false,
            overtime_rate: OvertimeRate::FiftyPercent,
            payment_method: PaymentMethod::Cash,
            status: EmployeeStatus::Active,
        }
    }

    #[test]
    fn test_deserialize_employee_with_defaults() {
        let json = r#"{
            "id": "emp_001",
            "name": "Ana Ruiz",
            "email": "ana@example.com",
            "role": "bartender",
            "hourly_rate": "10.00",
            "payment_method": {"type": "cash"}
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.payment_type, PaymentType::Hourly);
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert_eq!(employee.overtime_rate, OvertimeRate::FiftyPercent);
        assert!(!employee.pays_overtime);
        assert_eq!(employee.salary, None);
        assert_eq!(employee.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_deserialize_bank_transfer_method() {
        let json = r#"{
            "type": "bank_transfer",
            "bank_name": "Banco General",
            "account_number": "04-01-01-123456-7",
            "account_type": "savings"
        }"#;

        let method: PaymentMethod = serde_json::from_str(json).unwrap();
        assert_eq!(
            method,
            PaymentMethod::BankTransfer {
                bank_name: "Banco General".to_string(),
                account_number: "04-01-01-123456-7".to_string(),
                account_type: Some(BankAccountType::Savings),
            }
        );
        assert!(method.validate().is_ok());
    }

    #[test]
    fn test_payment_method_serializes_with_type_tag() {
        let json = serde_json::to_string(&PaymentMethod::Cash).unwrap();
        assert_eq!(json, r#"{"type":"cash"}"#);
    }

    #[test]
    fn test_bank_transfer_requires_bank_name() {
        let method = PaymentMethod::BankTransfer {
            bank_name: "  ".to_string(),
            account_number: "123".to_string(),
            account_type: Some(BankAccountType::Checking),
        };
        let err = method.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidPaymentMethod { ref method, .. } if method == "bank_transfer"));
    }

    #[test]
    fn test_bank_transfer_requires_account_type() {
        let method = PaymentMethod::BankTransfer {
            bank_name: "Banco General".to_string(),
            account_number: "123".to_string(),
            account_type: None,
        };
        assert!(method.validate().is_err());
    }

    #[test]
    fn test_mobile_wallet_requires_phone() {
        let method = PaymentMethod::MobileWallet {
            phone_number: String::new(),
        };
        let err = method.validate().unwrap_err();
        assert!(err.to_string().contains("phone number is required"));
    }

    #[test]
    fn test_cash_always_valid() {
        assert!(PaymentMethod::Cash.validate().is_ok());
    }

    #[test]
    fn test_overtime_rate_multipliers() {
        assert_eq!(OvertimeRate::FiftyPercent.multiplier(), dec("0.5"));
        assert_eq!(OvertimeRate::OneHundredPercent.multiplier(), dec("1.0"));
    }

    #[test]
    fn test_overtime_rate_serialization() {
        assert_eq!(
            serde_json::to_string(&OvertimeRate::OneHundredPercent).unwrap(),
            "\"one_hundred_percent\""
        );
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let mut employee = create_test_employee();
        employee.hourly_rate = dec("-1.00");
        let err = employee.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidPayInput { ref field, .. } if field == "hourly_rate"));
    }

    #[test]
    fn test_validate_rejects_salaried_without_salary() {
        let mut employee = create_test_employee();
        employee.payment_type = PaymentType::Salaried;
        let err = employee.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidPayInput { ref field, .. } if field == "salary"));
    }

    #[test]
    fn test_is_active_and_is_hourly() {
        let mut employee = create_test_employee();
        assert!(employee.is_active());
        assert!(employee.is_hourly());

        employee.status = EmployeeStatus::Inactive;
        employee.payment_type = PaymentType::Salaried;
        assert!(!employee.is_active());
        assert!(!employee.is_hourly());
    }
}
