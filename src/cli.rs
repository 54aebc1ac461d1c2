//! Parseo de argumentos del binario `stepflow`.
//!
//! CLI mínima con subcomandos:
//! `stepflow bills [--contact <id> | --name <txt> --phone <num>] [--category <id>] [--provider <id>] [--amount <n>] [--reference <txt>]`
//! `stepflow call --recent <index> [--anyway] [--end-after <secs>]`
//! `stepflow onboarding [--contact <id> | --manual <num> [--country <code>]] --phone <num> --code <6 digits>`

use flow_domain::BillCategoryId;

use crate::errors::AppError;

pub const USAGE: &str = "usage: stepflow <bills|call|onboarding> [options]
  bills      [--contact <id> | --name <txt> --phone <num>] [--category <id>] [--provider <id>] [--amount <n>] [--reference <txt>]
  call       --recent <index> [--anyway] [--end-after <secs>]
  onboarding [--contact <id> | --manual <num> [--country <code>]] --phone <num> --code <6 digits>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientArg {
    Contact(String),
    Manual { name: String, phone: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillsArgs {
    pub recipient: Option<RecipientArg>,
    pub category: BillCategoryId,
    pub provider: Option<String>,
    pub amount: Option<u64>,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallArgs {
    pub recent: usize,
    pub anyway: bool,
    pub end_after: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationArg {
    Contact(String),
    Manual { number: String, country: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingArgs {
    pub destination: DestinationArg,
    pub phone: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bills(BillsArgs),
    Call(CallArgs),
    Onboarding(OnboardingArgs),
    Help,
}

/// Recorre `--flag valor` a partir de `args[start]`.
struct Flags<'a> {
    args: &'a [String],
    i: usize,
}

impl<'a> Flags<'a> {
    fn next_flag(&mut self) -> Option<&'a str> {
        let flag = self.args.get(self.i)?;
        self.i += 1;
        Some(flag.as_str())
    }

    fn value(&mut self, flag: &str) -> Result<String, AppError> {
        let v = self.args
                    .get(self.i)
                    .ok_or_else(|| AppError::Usage(format!("missing value for {flag}")))?;
        self.i += 1;
        Ok(v.clone())
    }

    fn number<T: std::str::FromStr>(&mut self, flag: &str) -> Result<T, AppError> {
        let raw = self.value(flag)?;
        raw.parse::<T>()
           .map_err(|_| AppError::Usage(format!("{flag} expects a number, got '{raw}'")))
    }
}

/// `args` sin el nombre del binario.
pub fn parse_args(args: &[String]) -> Result<Command, AppError> {
    let Some(sub) = args.first() else {
        return Err(AppError::Usage("missing subcommand".into()));
    };
    let mut flags = Flags { args, i: 1 };
    match sub.as_str() {
        "bills" => parse_bills(&mut flags).map(Command::Bills),
        "call" => parse_call(&mut flags).map(Command::Call),
        "onboarding" => parse_onboarding(&mut flags).map(Command::Onboarding),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(AppError::Usage(format!("unknown subcommand '{other}'"))),
    }
}

fn parse_bills(flags: &mut Flags<'_>) -> Result<BillsArgs, AppError> {
    let mut contact = None;
    let mut name = None;
    let mut phone = None;
    let mut category = BillCategoryId::Electricity;
    let mut provider = None;
    let mut amount = None;
    let mut reference = "12345678901".to_string();
    while let Some(flag) = flags.next_flag() {
        match flag {
            "--contact" => contact = Some(flags.value(flag)?),
            "--name" => name = Some(flags.value(flag)?),
            "--phone" => phone = Some(flags.value(flag)?),
            "--category" => {
                let raw = flags.value(flag)?;
                category = raw.parse()
                              .map_err(|_| AppError::Usage(format!("unknown category '{raw}'")))?;
            }
            "--provider" => provider = Some(flags.value(flag)?),
            "--amount" => amount = Some(flags.number(flag)?),
            "--reference" => reference = flags.value(flag)?,
            other => return Err(AppError::Usage(format!("unknown option '{other}'"))),
        }
    }
    let recipient = match (contact, name, phone) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            return Err(AppError::Usage("--contact cannot be combined with --name/--phone".into()))
        }
        (Some(id), None, None) => Some(RecipientArg::Contact(id)),
        (None, None, None) => None,
        (None, name, phone) => Some(RecipientArg::Manual { name: name.unwrap_or_default(),
                                                            phone: phone.unwrap_or_default() }),
    };
    Ok(BillsArgs { recipient,
                   category,
                   provider,
                   amount,
                   reference })
}

fn parse_call(flags: &mut Flags<'_>) -> Result<CallArgs, AppError> {
    let mut recent = None;
    let mut anyway = false;
    let mut end_after = 3;
    while let Some(flag) = flags.next_flag() {
        match flag {
            "--recent" => recent = Some(flags.number(flag)?),
            "--anyway" => anyway = true,
            "--end-after" => end_after = flags.number(flag)?,
            other => return Err(AppError::Usage(format!("unknown option '{other}'"))),
        }
    }
    let recent = recent.ok_or_else(|| AppError::Usage("--recent is required".into()))?;
    Ok(CallArgs { recent,
                  anyway,
                  end_after })
}

fn parse_onboarding(flags: &mut Flags<'_>) -> Result<OnboardingArgs, AppError> {
    let mut contact = None;
    let mut manual = None;
    let mut country = None;
    let mut phone = None;
    let mut code = None;
    while let Some(flag) = flags.next_flag() {
        match flag {
            "--contact" => contact = Some(flags.value(flag)?),
            "--manual" => manual = Some(flags.value(flag)?),
            "--country" => country = Some(flags.value(flag)?),
            "--phone" => phone = Some(flags.value(flag)?),
            "--code" => code = Some(flags.value(flag)?),
            other => return Err(AppError::Usage(format!("unknown option '{other}'"))),
        }
    }
    let destination = match (contact, manual) {
        (Some(_), Some(_)) => return Err(AppError::Usage("use either --contact or --manual".into())),
        (Some(id), None) => DestinationArg::Contact(id),
        (None, Some(number)) => DestinationArg::Manual { number, country },
        (None, None) => return Err(AppError::Usage("--contact or --manual is required".into())),
    };
    Ok(OnboardingArgs { destination,
                        phone: phone.ok_or_else(|| AppError::Usage("--phone is required".into()))?,
                        code: code.ok_or_else(|| AppError::Usage("--code is required".into()))? })
}
