//! Salary arithmetic for the monthly payroll view.
//!
//! A month counts as 30 days and a workday as 9 hours. Pay is earned per
//! closed attendance day. Meal allowance accrues per day worked and
//! advances paid during the month are deducted.

use serde::Serialize;

use crate::{HrError, validation::round2};

pub const DAYS_PER_MONTH: f64 = 30.0;
pub const WORKDAY_HOURS: f64 = 9.0;

pub fn hourly_from_daily(daily_wage: f64, workday_hours: f64) -> Result<f64, HrError> {
    if workday_hours <= 0.0 {
        return Err(HrError::NonPositiveHours);
    }
    Ok(round2(daily_wage / workday_hours))
}

pub fn earned(hourly_rate: f64, total_hours: f64) -> f64 {
    round2(hourly_rate * total_hours)
}

/// Everything the salary computation needs for one employee and month.
#[derive(Clone, Debug)]
pub struct SalaryInputs<'a> {
    pub employee_id: &'a str,
    pub ad: &'a str,
    pub soyad: &'a str,
    pub pozisyon: &'a str,
    pub month: &'a str,
    pub base_salary: f64,
    /// Worked hours of each closed attendance record in the month.
    pub worked_hours: &'a [f64],
    pub daily_meal_rate: f64,
    pub advances: &'a [f64],
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlySalary {
    pub employee_id: String,
    pub ad: String,
    pub soyad: String,
    pub pozisyon: String,
    pub ay: String,
    pub temel_maas: f64,
    pub gunluk_maas: f64,
    pub saatlik_maas: f64,
    pub calisilan_gun: u32,
    pub calisilan_saat: f64,
    pub hakedilen_maas: f64,
    pub gunluk_yemek_ucreti: f64,
    pub toplam_yemek: f64,
    pub toplam_avans: f64,
    pub toplam_maas: f64,
}

/// Rounding happens on the outputs only; intermediate values keep full
/// precision.
pub fn monthly_salary(inputs: &SalaryInputs<'_>) -> MonthlySalary {
    let days = inputs.worked_hours.len() as u32;
    let hours: f64 = inputs.worked_hours.iter().sum();
    let daily = inputs.base_salary / DAYS_PER_MONTH;
    let hourly = daily / WORKDAY_HOURS;
    let earned = daily * f64::from(days);
    let meals = inputs.daily_meal_rate * f64::from(days);
    let advances: f64 = inputs.advances.iter().sum();
    let total = earned + meals - advances;

    MonthlySalary {
        employee_id: inputs.employee_id.to_string(),
        ad: inputs.ad.to_string(),
        soyad: inputs.soyad.to_string(),
        pozisyon: inputs.pozisyon.to_string(),
        ay: inputs.month.to_string(),
        temel_maas: inputs.base_salary,
        gunluk_maas: round2(daily),
        saatlik_maas: round2(hourly),
        calisilan_gun: days,
        calisilan_saat: round2(hours),
        hakedilen_maas: round2(earned),
        gunluk_yemek_ucreti: inputs.daily_meal_rate,
        toplam_yemek: round2(meals),
        toplam_avans: round2(advances),
        toplam_maas: round2(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_rate_rounds_and_rejects_zero_hours() {
        assert_eq!(hourly_from_daily(1000.0, 9.0), Ok(111.11));
        assert_eq!(hourly_from_daily(900.0, 8.0), Ok(112.5));
        assert_eq!(hourly_from_daily(900.0, 0.0), Err(HrError::NonPositiveHours));
        assert_eq!(hourly_from_daily(900.0, -1.0), Err(HrError::NonPositiveHours));
    }

    #[test]
    fn earned_multiplies_and_rounds() {
        assert_eq!(earned(111.11, 8.0), 888.88);
        assert_eq!(earned(120.0, 7.5), 900.0);
        assert_eq!(earned(0.0, 40.0), 0.0);
    }

    #[test]
    fn monthly_salary_combines_days_meals_and_advances() {
        let hours = [9.0, 8.5, 9.25];
        let advances = [500.0, 250.0];
        let salary = monthly_salary(&SalaryInputs {
            employee_id: "3010",
            ad: "Çalışan",
            soyad: "3010",
            pozisyon: "Worker",
            month: "2025-10",
            base_salary: 30000.0,
            worked_hours: &hours,
            daily_meal_rate: 150.0,
            advances: &advances,
        });

        assert_eq!(salary.gunluk_maas, 1000.0);
        assert_eq!(salary.saatlik_maas, 111.11);
        assert_eq!(salary.calisilan_gun, 3);
        assert_eq!(salary.calisilan_saat, 26.75);
        assert_eq!(salary.hakedilen_maas, 3000.0);
        assert_eq!(salary.toplam_yemek, 450.0);
        assert_eq!(salary.toplam_avans, 750.0);
        assert_eq!(salary.toplam_maas, 2700.0);
    }

    #[test]
    fn idle_month_can_go_negative_after_advances() {
        let advances = [1200.0];
        let salary = monthly_salary(&SalaryInputs {
            employee_id: "1",
            ad: "Demo",
            soyad: "User",
            pozisyon: "Administrator",
            month: "2025-10",
            base_salary: 50000.0,
            worked_hours: &[],
            daily_meal_rate: 0.0,
            advances: &advances,
        });
        assert_eq!(salary.calisilan_gun, 0);
        assert_eq!(salary.hakedilen_maas, 0.0);
        assert_eq!(salary.toplam_maas, -1200.0);
        assert_eq!(salary.gunluk_maas, 1666.67);
    }
}
