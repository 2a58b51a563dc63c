//! Retirement Calculator CLI
//!
//! Command-line interface for running the retirement calculators

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use retirement_calc::catalog::explanations;
use retirement_calc::format::{format_currency, format_percent};
use retirement_calc::input::FormDefaults;
use retirement_calc::{
    calculate_401k, calculate_retirement, calculate_savings_goal, calculate_social_security,
    CalculatorKind, ConstantsTable, Plan401kInput, Plan401kResult, RetirementInput,
    RetirementResult, SavingsGoalInput, SavingsGoalResult, ScenarioRunner, SocialSecurityInput,
    SocialSecurityResult,
};

#[derive(Debug, Parser)]
#[command(name = "retirement_calc", version, about = "Retirement planning calculators")]
struct Cli {
    /// CSV file of `key,value` overrides for the built-in constants
    #[arg(long, global = true)]
    constants: Option<PathBuf>,

    /// Print the result record as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// How much will I have when I retire?
    Retirement(RetirementArgs),

    /// 401(k) growth with employer match
    #[command(name = "401k")]
    Plan401k(Plan401kArgs),

    /// Social Security benefit at one claiming age
    SocialSecurity {
        /// Average monthly earnings
        #[arg(long)]
        earnings: Option<f64>,
        /// Claiming age (62-70)
        #[arg(long)]
        claiming_age: Option<u32>,
    },

    /// Monthly saving needed to reach a target
    SavingsGoal {
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        savings: Option<f64>,
        #[arg(long)]
        current_age: Option<u32>,
        #[arg(long)]
        retirement_age: Option<u32>,
        /// Expected annual return (percent)
        #[arg(long)]
        expected_return: Option<f64>,
    },

    /// Social Security benefit for every claiming age from 62 to 70
    CompareClaiming {
        #[arg(long)]
        earnings: Option<f64>,
    },

    /// Retirement projection across several expected returns
    Sensitivity {
        #[command(flatten)]
        retirement: RetirementArgs,
        /// Comma-separated expected returns (percent)
        #[arg(long, value_delimiter = ',', default_values_t = vec![4.0, 5.0, 6.0, 7.0, 8.0])]
        returns: Vec<f64>,
    },

    /// List the available calculators
    List,
}

#[derive(Debug, Args)]
struct RetirementArgs {
    #[arg(long)]
    current_age: Option<u32>,
    #[arg(long)]
    retirement_age: Option<u32>,
    /// Savings to date
    #[arg(long)]
    savings: Option<f64>,
    /// Monthly contribution
    #[arg(long)]
    monthly: Option<f64>,
    /// Expected annual return (percent)
    #[arg(long)]
    expected_return: Option<f64>,
    /// Annual withdrawal rate in retirement (percent)
    #[arg(long)]
    withdrawal_rate: Option<f64>,
}

impl RetirementArgs {
    fn to_input(&self, constants: &ConstantsTable) -> RetirementInput {
        let base = RetirementInput::defaults(constants);
        RetirementInput {
            current_age: self.current_age.unwrap_or(base.current_age),
            retirement_age: self.retirement_age.unwrap_or(base.retirement_age),
            current_savings: self.savings.unwrap_or(base.current_savings),
            monthly_contribution: self.monthly.unwrap_or(base.monthly_contribution),
            expected_return_percent: self.expected_return.unwrap_or(base.expected_return_percent),
            withdrawal_rate_percent: self.withdrawal_rate.unwrap_or(base.withdrawal_rate_percent),
        }
    }
}

#[derive(Debug, Args)]
struct Plan401kArgs {
    #[arg(long)]
    salary: Option<f64>,
    /// Employee contribution (percent of salary)
    #[arg(long)]
    contribution: Option<f64>,
    /// Employer match (percent of contribution)
    #[arg(long)]
    employer_match: Option<f64>,
    /// Employer match ceiling (percent of salary)
    #[arg(long)]
    match_up_to: Option<f64>,
    #[arg(long)]
    current_age: Option<u32>,
    #[arg(long)]
    retirement_age: Option<u32>,
    /// Current 401(k) balance
    #[arg(long)]
    balance: Option<f64>,
    /// Expected annual return (percent)
    #[arg(long)]
    expected_return: Option<f64>,
}

impl Plan401kArgs {
    fn to_input(&self, constants: &ConstantsTable, form: &FormDefaults) -> Plan401kInput {
        let d = &constants.defaults;
        let base = Plan401kInput::new(
            constants,
            self.salary.unwrap_or(form.annual_salary),
            self.contribution.unwrap_or(form.contribution_percent),
            self.current_age.unwrap_or(d.current_age),
            self.retirement_age.unwrap_or(d.retirement_age),
            self.balance.unwrap_or(form.current_balance),
        );
        let base = base.with_employer_match(
            self.employer_match.unwrap_or(base.employer_match_percent),
            self.match_up_to.unwrap_or(base.employer_match_up_to_percent),
        );
        match self.expected_return {
            Some(pct) => base.with_expected_return(pct),
            None => base,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let constants = match &cli.constants {
        Some(path) => ConstantsTable::from_csv_path(path)
            .with_context(|| format!("loading constants from {}", path.display()))?,
        None => ConstantsTable::for_2025(),
    };
    let form = FormDefaults::default();

    match &cli.command {
        Command::Retirement(args) => {
            let result = calculate_retirement(&args.to_input(&constants), &constants)?;
            emit(cli.json, &result, print_retirement)?;
        }
        Command::Plan401k(args) => {
            let result = calculate_401k(&args.to_input(&constants, &form), &constants)?;
            emit(cli.json, &result, print_401k)?;
        }
        Command::SocialSecurity {
            earnings,
            claiming_age,
        } => {
            let input = SocialSecurityInput {
                average_monthly_earnings: earnings.unwrap_or(form.average_monthly_earnings),
                claiming_age: claiming_age.unwrap_or(form.claiming_age),
            };
            let result = calculate_social_security(&input, &constants)?;
            emit(cli.json, &result, print_social_security)?;
        }
        Command::SavingsGoal {
            target,
            savings,
            current_age,
            retirement_age,
            expected_return,
        } => {
            let mut input = SavingsGoalInput::new(
                target.unwrap_or(form.target_amount),
                savings.unwrap_or(form.goal_current_savings),
                current_age.unwrap_or(constants.defaults.current_age),
                retirement_age.unwrap_or(constants.defaults.retirement_age),
            );
            if let Some(pct) = expected_return {
                input = input.with_expected_return(*pct);
            }
            let result = calculate_savings_goal(&input, &constants)?;
            emit(cli.json, &result, print_savings_goal)?;
        }
        Command::CompareClaiming { earnings } => {
            let runner = ScenarioRunner::with_constants(constants);
            let results = runner
                .compare_claiming_ages(earnings.unwrap_or(form.average_monthly_earnings))?;
            emit(cli.json, &results, |rows| print_claiming_table(rows))?;
        }
        Command::Sensitivity {
            retirement,
            returns,
        } => {
            let runner = ScenarioRunner::with_constants(constants);
            let input = retirement.to_input(runner.constants());
            let results = runner.return_sensitivity(&input, returns)?;
            emit(cli.json, &results, |rows| print_sensitivity_table(returns, rows))?;
        }
        Command::List => {
            for kind in CalculatorKind::ALL {
                println!("{:<16} {:<30} {}", kind.id(), kind.name(), kind.description());
            }
        }
    }

    Ok(())
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, print: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value).context("serializing result")?);
    } else {
        print(value);
    }
    Ok(())
}

fn print_retirement(result: &RetirementResult) {
    println!("{}", CalculatorKind::Retirement.name());
    println!("{}\n", "=".repeat(40));
    println!(
        "At age {}, you could have {}",
        result.retirement_age,
        format_currency(result.projected_balance)
    );
    println!("  Monthly income:        {}", format_currency(result.monthly_retirement_income));
    println!("  Annual income:         {}", format_currency(result.annual_retirement_income));
    println!();
    println!("  Years to retirement:   {}", result.years_to_retirement);
    println!("  Current savings:       {}", format_currency(result.current_savings));
    println!("  Your contributions:   +{}", format_currency(result.total_contributions));
    println!("  Investment growth:    +{}", format_currency(result.investment_growth()));
    println!("  Years of retirement:   {}", result.years_of_retirement);

    if !result.schedule.is_empty() {
        println!("\n{:>5} {:>16} {:>16}", "Year", "Balance", "Contributed");
        println!("{}", "-".repeat(39));
        for year in &result.schedule {
            println!(
                "{:>5} {:>16} {:>16}",
                year.year,
                format_currency(year.end_balance),
                format_currency(year.contributions_to_date)
            );
        }
    }

    println!("\n{}", explanations::FOUR_PERCENT_RULE);
}

fn print_401k(result: &Plan401kResult) {
    println!("{}", CalculatorKind::Plan401k.name());
    println!("{}\n", "=".repeat(40));
    println!("Projected balance: {}", format_currency(result.projected_balance));
    println!();
    println!("  Your contribution:     {}", format_currency(result.annual_contribution));
    println!("  Employer match:       +{}", format_currency(result.employer_match_amount));
    println!("  Total per year:        {}", format_currency(result.total_annual_contribution));
    println!("  Years to retirement:   {}", result.years_to_retirement);
    println!("  Contribution limit:    {}", format_currency(result.max_contribution as f64));

    if result.employer_match_amount > 0.0 {
        println!(
            "\nYour employer contributes {} per year. That's {} over {} years!",
            format_currency(result.employer_match_amount),
            format_currency(result.lifetime_employer_match()),
            result.years_to_retirement
        );
    }
    if result.is_limited() {
        println!(
            "\nRequested {} exceeds the limit; contribution capped at {}.",
            format_currency(result.requested_contribution),
            format_currency(result.max_contribution as f64)
        );
    }
    if result.is_50_plus {
        println!(
            "\nCatch-up eligible: an extra {} per year is allowed.",
            format_currency(result.catch_up_amount as f64)
        );
        println!("{}", explanations::CATCH_UP_CONTRIBUTION);
    }
}

fn print_social_security(result: &SocialSecurityResult) {
    println!("{}", CalculatorKind::SocialSecurity.name());
    println!("{}\n", "=".repeat(40));
    println!(
        "Estimated monthly benefit at age {}: {}",
        result.claiming_age,
        format_currency(result.monthly_benefit)
    );
    println!("  Annual benefit:        {}", format_currency(result.annual_benefit));
    println!("  Lifetime benefit:      {}", format_currency(result.lifetime_benefit));
    println!("  Percent of maximum:    {}", format_percent(result.percent_of_max));
    println!("\n{}", result.recommendation_message);
}

fn print_savings_goal(result: &SavingsGoalResult) {
    println!("{}", CalculatorKind::SavingsGoal.name());
    println!("{}\n", "=".repeat(40));
    println!(
        "To reach {}, save {} per month",
        format_currency(result.target_amount),
        format_currency(result.monthly_needed)
    );
    println!("  Years to retirement:   {}", result.years_to_retirement);
    println!("  Current savings:       {}", format_currency(result.current_savings));
    println!("  Total contributions:   {}", format_currency(result.total_contributions));
    println!("  Interest earned:      +{}", format_currency(result.interest_earned));
    if result.is_achievable {
        println!("\nThis goal fits within the combined 401(k) and IRA limits.");
    } else {
        println!("\nThis goal needs more than the combined 401(k) and IRA limits allow.");
    }
}

fn print_claiming_table(rows: &[SocialSecurityResult]) {
    println!("{:>4} {:>8} {:>10} {:>12} {:>14} {:>6}", "Age", "Factor", "Monthly", "Annual", "Lifetime", "% Max");
    println!("{}", "-".repeat(59));
    for row in rows {
        println!(
            "{:>4} {:>8.4} {:>10} {:>12} {:>14} {:>6}",
            row.claiming_age,
            row.adjustment_factor,
            format_currency(row.monthly_benefit),
            format_currency(row.annual_benefit),
            format_currency(row.lifetime_benefit),
            format_percent(row.percent_of_max),
        );
    }
}

fn print_sensitivity_table(returns: &[f64], rows: &[RetirementResult]) {
    println!("{:>8} {:>16} {:>14} {:>14}", "Return", "Balance", "Annual", "Monthly");
    println!("{}", "-".repeat(55));
    for (pct, row) in returns.iter().zip(rows) {
        println!(
            "{:>8} {:>16} {:>14} {:>14}",
            format_percent(*pct),
            format_currency(row.projected_balance),
            format_currency(row.annual_retirement_income),
            format_currency(row.monthly_retirement_income),
        );
    }
}
