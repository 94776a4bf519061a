//! Pay calculation functionality.
//!
//! This module converts an hour breakdown and an employee's pay policy into
//! the amount owed for a range.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, HoursCalculation, PaymentType};

const MINUTES_PER_HOUR: i64 = 60;

/// Everything the pay formula reads.
///
/// Worked time is carried in whole minutes so that pay never depends on the
/// rounded hour values shown on a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayInput {
    /// Rate per hour.
    pub hourly_rate: Decimal,
    /// Fixed salary for the range. `None` for hourly pay.
    pub salary: Option<Decimal>,
    /// Whether overtime earns a premium.
    pub pays_overtime: bool,
    /// Premium on top of the plain rate (0.5 or 1.0).
    pub overtime_multiplier: Decimal,
    /// Minutes paid at the plain rate.
    pub regular_minutes: i64,
    /// Minutes beyond the overtime threshold.
    pub overtime_minutes: i64,
}

impl PayInput {
    /// Collects the pay inputs for an employee.
    ///
    /// Fails with `InvalidPayInput` if a salaried employee has no salary.
    pub fn for_employee(employee: &Employee, hours: &HoursCalculation) -> EngineResult<Self> {
        let salary = match employee.payment_type {
            PaymentType::Hourly => None,
            PaymentType::Salaried => {
                Some(employee.salary.ok_or_else(|| EngineError::InvalidPayInput {
                    field: "salary".to_string(),
                    message: format!("salaried employee '{}' has no salary", employee.id),
                })?)
            }
        };

        Ok(Self {
            hourly_rate: employee.hourly_rate,
            salary,
            pays_overtime: employee.pays_overtime,
            overtime_multiplier: employee.overtime_rate.multiplier(),
            regular_minutes: hours.regular_minutes,
            overtime_minutes: hours.overtime_minutes(),
        })
    }

    fn validate(&self) -> EngineResult<()> {
        let checks = [
            ("hourly_rate", Some(self.hourly_rate)),
            ("salary", self.salary),
            ("regular_minutes", Some(Decimal::from(self.regular_minutes))),
            ("overtime_minutes", Some(Decimal::from(self.overtime_minutes))),
        ];
        let negative = checks
            .into_iter()
            .filter_map(|(field, value)| value.map(|value| (field, value)))
            .find(|(_, value)| *value < Decimal::ZERO);

        match negative {
            Some((field, value)) => Err(EngineError::InvalidPayInput {
                field: field.to_string(),
                message: format!("must not be negative, got {}", value),
            }),
            None => Ok(()),
        }
    }
}

/// The result of a pay calculation.
///
/// Components are exact up to Decimal precision. Only `total_pay` is rounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayCalculation {
    /// Fixed salary, zero for hourly pay.
    pub base_salary: Decimal,
    /// Regular minutes at the plain rate, zero for salaried pay.
    pub regular_pay: Decimal,
    /// Overtime minutes at the plain or premium rate.
    pub overtime_pay: Decimal,
    /// Sum of the components, rounded half-up to the money scale.
    pub total_pay: Decimal,
}

/// Calculates pay owed.
///
/// Hourly pay is `rate × regular + overtime pay`. Salaried pay is
/// `salary + overtime pay`. Overtime pay is `rate × overtime × (1 + multiplier)`
/// when the employee is paid overtime, or `rate × overtime` when not. The
/// second case means the hours and the pay policy disagree, so it is logged.
///
/// Each term is multiplied out in minutes and divided by 60 once, and only
/// the final total is rounded.
///
/// # Errors
///
/// `InvalidPayInput` if the rate, salary or any minutes are negative, or if
/// an amount is too large for a `Decimal`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{PayInput, calculate_pay};
/// use rust_decimal::Decimal;
///
/// let input = PayInput {
///     hourly_rate: Decimal::new(1000, 2),
///     salary: None,
///     pays_overtime: true,
///     overtime_multiplier: Decimal::new(5, 1),
///     regular_minutes: 40 * 60,
///     overtime_minutes: 5 * 60,
/// };
/// let pay = calculate_pay(&input, 2).unwrap();
/// assert_eq!(pay.total_pay, Decimal::new(47500, 2));
/// ```
pub fn calculate_pay(input: &PayInput, scale: u32) -> EngineResult<PayCalculation> {
    input.validate()?;

    let overtime_factor = if input.pays_overtime {
        Decimal::ONE + input.overtime_multiplier
    } else {
        if input.overtime_minutes > 0 {
            warn!(
                overtime_minutes = input.overtime_minutes,
                "Overtime hours present for an employee without overtime pay, paying plain rate"
            );
        }
        Decimal::ONE
    };

    let overtime_amount = minute_amount(input.hourly_rate, input.overtime_minutes, overtime_factor)
        .ok_or_else(|| too_large("overtime_minutes"))?;
    let (base_salary, regular_amount) = match input.salary {
        Some(salary) => (salary, Decimal::ZERO),
        None => (
            Decimal::ZERO,
            minute_amount(input.hourly_rate, input.regular_minutes, Decimal::ONE)
                .ok_or_else(|| too_large("regular_minutes"))?,
        ),
    };

    let per_hour = Decimal::from(MINUTES_PER_HOUR);
    let hourly_total = regular_amount
        .checked_add(overtime_amount)
        .and_then(|amount| amount.checked_div(per_hour))
        .ok_or_else(|| too_large("hourly_rate"))?;
    let total_pay = base_salary
        .checked_add(hourly_total)
        .ok_or_else(|| too_large("salary"))?
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);

    let regular_pay = regular_amount / per_hour;
    let overtime_pay = overtime_amount / per_hour;

    debug!(
        base_salary = %base_salary,
        regular_pay = %regular_pay,
        overtime_pay = %overtime_pay,
        total_pay = %total_pay,
        "Calculated pay"
    );

    Ok(PayCalculation {
        base_salary,
        regular_pay,
        overtime_pay,
        total_pay,
    })
}

/// `rate × minutes × factor`, still in rate-minutes.
fn minute_amount(rate: Decimal, minutes: i64, factor: Decimal) -> Option<Decimal> {
    rate.checked_mul(Decimal::from(minutes))?.checked_mul(factor)
}

fn too_large(field: &str) -> EngineError {
    EngineError::InvalidPayInput {
        field: field.to_string(),
        message: "amount is too large to calculate".to_string(),
    }
}
