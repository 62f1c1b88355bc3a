//! Input model for the planner
//!
//! A `HouseholdFinances` value is the finalized snapshot the planner consumes.
//! Numeric fields are deserialized leniently: numbers and numeric strings are
//! accepted, anything else becomes 0. Field names are snake_case, and the
//! camelCase keys used by the original web form are accepted as aliases.

use serde::{Deserialize, Serialize};

/// Credit-card rate (percent) applied when the snapshot leaves it unset
pub const DEFAULT_CREDIT_CARD_RATE: f64 = 18.0;

fn default_credit_card_rate() -> f64 {
    DEFAULT_CREDIT_CARD_RATE
}

fn default_true() -> bool {
    true
}

/// A household's finances at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdFinances {
    // Income
    #[serde(default, alias = "monthlySalaryNet", deserialize_with = "lenient::amount")]
    pub monthly_salary: f64,
    /// Whether the household receives holiday and Christmas bonus pay (subsídios)
    #[serde(
        default = "default_true",
        alias = "receivesSubsidios",
        deserialize_with = "lenient::flag_or_true"
    )]
    pub receives_subsidies: bool,
    /// Holiday bonus; 0 means "same as the monthly salary"
    #[serde(default, alias = "subsidioFerias", deserialize_with = "lenient::amount")]
    pub holiday_subsidy: f64,
    /// Christmas bonus; 0 means "same as the monthly salary"
    #[serde(default, alias = "subsidioNatal", deserialize_with = "lenient::amount")]
    pub christmas_subsidy: f64,
    #[serde(default, alias = "otherMonthlyIncome", deserialize_with = "lenient::amount")]
    pub other_monthly_income: f64,
    #[serde(default, alias = "otherYearlyIncome", deserialize_with = "lenient::amount")]
    pub other_yearly_income: f64,

    // Fixed expenses
    #[serde(default, deserialize_with = "lenient::amount")]
    pub rent: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub utilities: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub insurance: f64,
    #[serde(default, alias = "phoneInternet", deserialize_with = "lenient::amount")]
    pub phone_internet: f64,
    #[serde(default, alias = "transportPass", deserialize_with = "lenient::amount")]
    pub transport_pass: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub condominium: f64,

    // Variable expenses
    #[serde(default, deserialize_with = "lenient::amount")]
    pub groceries: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub dining: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub entertainment: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub subscriptions: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub clothing: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub health: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub education: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub pets: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub other: f64,

    // Credit card
    #[serde(default, alias = "creditCardDebt", deserialize_with = "lenient::amount")]
    pub credit_card_debt: f64,
    #[serde(
        default,
        alias = "creditCardMonthlyPayment",
        deserialize_with = "lenient::amount"
    )]
    pub credit_card_monthly_payment: f64,
    #[serde(
        default = "default_credit_card_rate",
        alias = "creditCardInterestRate",
        deserialize_with = "lenient::card_rate"
    )]
    pub credit_card_interest_rate: f64,

    // Savings & goals
    #[serde(default, alias = "currentSavings", deserialize_with = "lenient::amount")]
    pub current_savings: f64,
    #[serde(default, alias = "savingsGoal2026", deserialize_with = "lenient::amount")]
    pub savings_goal: f64,

    // Family
    #[serde(default, deserialize_with = "lenient::count")]
    pub dependents: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub household: u32,

    // Investments
    #[serde(
        default,
        alias = "hasInvestments",
        deserialize_with = "lenient::flag_or_false"
    )]
    pub has_investments: bool,
    #[serde(default)]
    pub investments: Investments,

    /// Ordered loan list; ids are unique within the list
    #[serde(default)]
    pub loans: Vec<Loan>,
}

impl Default for HouseholdFinances {
    fn default() -> Self {
        Self {
            monthly_salary: 0.0,
            receives_subsidies: true,
            holiday_subsidy: 0.0,
            christmas_subsidy: 0.0,
            other_monthly_income: 0.0,
            other_yearly_income: 0.0,
            rent: 0.0,
            utilities: 0.0,
            insurance: 0.0,
            phone_internet: 0.0,
            transport_pass: 0.0,
            condominium: 0.0,
            groceries: 0.0,
            dining: 0.0,
            entertainment: 0.0,
            subscriptions: 0.0,
            clothing: 0.0,
            health: 0.0,
            education: 0.0,
            pets: 0.0,
            other: 0.0,
            credit_card_debt: 0.0,
            credit_card_monthly_payment: 0.0,
            credit_card_interest_rate: DEFAULT_CREDIT_CARD_RATE,
            current_savings: 0.0,
            savings_goal: 0.0,
            dependents: 0,
            household: 0,
            has_investments: false,
            investments: Investments::default(),
            loans: Vec::new(),
        }
    }
}

impl HouseholdFinances {
    /// Copy with every negative or non-finite amount replaced by 0
    pub fn normalized(&self) -> Self {
        Self {
            monthly_salary: non_negative(self.monthly_salary),
            receives_subsidies: self.receives_subsidies,
            holiday_subsidy: non_negative(self.holiday_subsidy),
            christmas_subsidy: non_negative(self.christmas_subsidy),
            other_monthly_income: non_negative(self.other_monthly_income),
            other_yearly_income: non_negative(self.other_yearly_income),
            rent: non_negative(self.rent),
            utilities: non_negative(self.utilities),
            insurance: non_negative(self.insurance),
            phone_internet: non_negative(self.phone_internet),
            transport_pass: non_negative(self.transport_pass),
            condominium: non_negative(self.condominium),
            groceries: non_negative(self.groceries),
            dining: non_negative(self.dining),
            entertainment: non_negative(self.entertainment),
            subscriptions: non_negative(self.subscriptions),
            clothing: non_negative(self.clothing),
            health: non_negative(self.health),
            education: non_negative(self.education),
            pets: non_negative(self.pets),
            other: non_negative(self.other),
            credit_card_debt: non_negative(self.credit_card_debt),
            credit_card_monthly_payment: non_negative(self.credit_card_monthly_payment),
            credit_card_interest_rate: card_rate_or_default(self.credit_card_interest_rate),
            current_savings: non_negative(self.current_savings),
            savings_goal: non_negative(self.savings_goal),
            dependents: self.dependents,
            household: self.household,
            has_investments: self.has_investments,
            investments: self.investments.normalized(),
            loans: self.loans.iter().map(Loan::normalized).collect(),
        }
    }

    /// Copy with `loan` appended to the loan list
    pub fn with_loan(&self, loan: Loan) -> Self {
        let mut next = self.clone();
        next.loans.push(loan);
        next
    }

    /// Copy with the loan identified by `id` replaced by `update(loan)`
    ///
    /// Returns an unchanged copy when no loan has that id.
    pub fn with_updated_loan(&self, id: u64, update: impl FnOnce(Loan) -> Loan) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.loans.iter_mut().find(|l| l.id == id) {
            *slot = update(slot.clone());
        }
        next
    }

    /// Copy without the loan identified by `id`
    pub fn without_loan(&self, id: u64) -> Self {
        let mut next = self.clone();
        next.loans.retain(|l| l.id != id);
        next
    }
}

/// A loan as entered by the household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Total amount still owed (€)
    #[serde(default, alias = "totalAmount", deserialize_with = "lenient::amount")]
    pub total_amount: f64,
    #[serde(default, alias = "monthlyPayment", deserialize_with = "lenient::amount")]
    pub monthly_payment: f64,
    /// Annual interest rate in percent
    #[serde(default, alias = "interestRate", deserialize_with = "lenient::amount")]
    pub interest_rate: f64,
    #[serde(default, alias = "remainingMonths", deserialize_with = "lenient::count")]
    pub remaining_months: u32,
}

impl Loan {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        total_amount: f64,
        monthly_payment: f64,
        interest_rate: f64,
        remaining_months: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            total_amount,
            monthly_payment,
            interest_rate,
            remaining_months,
        }
    }

    fn normalized(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            total_amount: non_negative(self.total_amount),
            monthly_payment: non_negative(self.monthly_payment),
            interest_rate: non_negative(self.interest_rate),
            remaining_months: self.remaining_months,
        }
    }
}

/// Amounts held in the seven fixed investment categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Investments {
    #[serde(default, alias = "certificadosAforro", deserialize_with = "lenient::amount")]
    pub certificados_aforro: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub ppr: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub etfs: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub acoes: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub fundos: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub crypto: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub outros: f64,
}

impl Investments {
    /// Display label and amount for each category, in fixed order
    pub fn categories(&self) -> [(&'static str, f64); 7] {
        [
            ("Certificados", self.certificados_aforro),
            ("PPR", self.ppr),
            ("ETFs", self.etfs),
            ("Ações", self.acoes),
            ("Fundos", self.fundos),
            ("Crypto", self.crypto),
            ("Outros", self.outros),
        ]
    }

    pub fn total(&self) -> f64 {
        self.categories().iter().map(|(_, amount)| amount).sum()
    }

    fn normalized(&self) -> Self {
        Self {
            certificados_aforro: non_negative(self.certificados_aforro),
            ppr: non_negative(self.ppr),
            etfs: non_negative(self.etfs),
            acoes: non_negative(self.acoes),
            fundos: non_negative(self.fundos),
            crypto: non_negative(self.crypto),
            outros: non_negative(self.outros),
        }
    }
}

/// A card rate that is zero, negative or not a number counts as unset
fn card_rate_or_default(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        DEFAULT_CREDIT_CARD_RATE
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Forgiving deserializers for form-sourced values
mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Flag(bool),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    fn number(raw: Raw) -> f64 {
        match raw {
            Raw::Number(v) => v,
            Raw::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Raw::Flag(_) | Raw::Other(_) => 0.0,
        }
    }

    fn flag(raw: Raw) -> Option<bool> {
        match raw {
            Raw::Flag(b) => Some(b),
            Raw::Number(v) => Some(v != 0.0),
            Raw::Text(s) => match s.trim().to_lowercase().as_str() {
                "yes" | "sim" | "true" | "1" => Some(true),
                "no" | "não" | "nao" | "false" | "0" => Some(false),
                _ => None,
            },
            Raw::Other(_) => None,
        }
    }

    pub fn amount<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(number(Raw::deserialize(d)?))
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        let v = number(Raw::deserialize(d)?);
        if v.is_finite() && v > 0.0 {
            Ok(v.floor().min(u32::MAX as f64) as u32)
        } else {
            Ok(0)
        }
    }

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        let v = number(Raw::deserialize(d)?);
        if v.is_finite() && v > 0.0 {
            Ok(v.floor().min(u64::MAX as f64) as u64)
        } else {
            Ok(0)
        }
    }

    pub fn card_rate<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(super::card_rate_or_default(number(Raw::deserialize(d)?)))
    }

    pub fn flag_or_true<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(flag(Raw::deserialize(d)?).unwrap_or(true))
    }

    pub fn flag_or_false<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(flag(Raw::deserialize(d)?).unwrap_or(false))
    }
}
