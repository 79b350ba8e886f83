use crate::error::GatewayError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

/// A monetary amount as carried on a payment record.
///
/// Wraps `rust_decimal::Decimal` so amounts never pass through floating point
/// on their way to the processor.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Formats the amount the way the processor expects it: exactly two
    /// decimal places, `.` as separator, midpoints rounded away from zero.
    pub fn to_processor_string(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_processor_string())
    }
}

/// ISO 4217 currency codes the express-checkout API accepts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    #[strum(serialize = "AED")]
    Aed,
    #[strum(serialize = "AFN")]
    Afn,
    #[strum(serialize = "ALL")]
    All,
    #[strum(serialize = "AMD")]
    Amd,
    #[strum(serialize = "ANG")]
    Ang,
    #[strum(serialize = "AOA")]
    Aoa,
    #[strum(serialize = "ARS")]
    Ars,
    #[strum(serialize = "AUD")]
    Aud,
    #[strum(serialize = "AWG")]
    Awg,
    #[strum(serialize = "AZN")]
    Azn,
    #[strum(serialize = "BAM")]
    Bam,
    #[strum(serialize = "BBD")]
    Bbd,
    #[strum(serialize = "BDT")]
    Bdt,
    #[strum(serialize = "BGN")]
    Bgn,
    #[strum(serialize = "BHD")]
    Bhd,
    #[strum(serialize = "BIF")]
    Bif,
    #[strum(serialize = "BMD")]
    Bmd,
    #[strum(serialize = "BND")]
    Bnd,
    #[strum(serialize = "BOB")]
    Bob,
    #[strum(serialize = "BRL")]
    Brl,
    #[strum(serialize = "BSD")]
    Bsd,
    #[strum(serialize = "BTN")]
    Btn,
    #[strum(serialize = "BWP")]
    Bwp,
    #[strum(serialize = "BYN")]
    Byn,
    #[strum(serialize = "BZD")]
    Bzd,
    #[strum(serialize = "CAD")]
    Cad,
    #[strum(serialize = "CDF")]
    Cdf,
    #[strum(serialize = "CHF")]
    Chf,
    #[strum(serialize = "CLP")]
    Clp,
    #[strum(serialize = "CNY")]
    Cny,
    #[strum(serialize = "COP")]
    Cop,
    #[strum(serialize = "CRC")]
    Crc,
    #[strum(serialize = "CUP")]
    Cup,
    #[strum(serialize = "CVE")]
    Cve,
    #[strum(serialize = "CZK")]
    Czk,
    #[strum(serialize = "DJF")]
    Djf,
    #[strum(serialize = "DKK")]
    Dkk,
    #[strum(serialize = "DOP")]
    Dop,
    #[strum(serialize = "DZD")]
    Dzd,
    #[strum(serialize = "EGP")]
    Egp,
    #[strum(serialize = "ERN")]
    Ern,
    #[strum(serialize = "ETB")]
    Etb,
    #[strum(serialize = "EUR")]
    Eur,
    #[strum(serialize = "FJD")]
    Fjd,
    #[strum(serialize = "FKP")]
    Fkp,
    #[strum(serialize = "GBP")]
    Gbp,
    #[strum(serialize = "GEL")]
    Gel,
    #[strum(serialize = "GHS")]
    Ghs,
    #[strum(serialize = "GIP")]
    Gip,
    #[strum(serialize = "GMD")]
    Gmd,
    #[strum(serialize = "GNF")]
    Gnf,
    #[strum(serialize = "GTQ")]
    Gtq,
    #[strum(serialize = "GYD")]
    Gyd,
    #[strum(serialize = "HKD")]
    Hkd,
    #[strum(serialize = "HNL")]
    Hnl,
    #[strum(serialize = "HTG")]
    Htg,
    #[strum(serialize = "HUF")]
    Huf,
    #[strum(serialize = "IDR")]
    Idr,
    #[strum(serialize = "ILS")]
    Ils,
    #[strum(serialize = "INR")]
    Inr,
    #[strum(serialize = "IQD")]
    Iqd,
    #[strum(serialize = "IRR")]
    Irr,
    #[strum(serialize = "ISK")]
    Isk,
    #[strum(serialize = "JMD")]
    Jmd,
    #[strum(serialize = "JOD")]
    Jod,
    #[strum(serialize = "JPY")]
    Jpy,
    #[strum(serialize = "KES")]
    Kes,
    #[strum(serialize = "KGS")]
    Kgs,
    #[strum(serialize = "KHR")]
    Khr,
    #[strum(serialize = "KMF")]
    Kmf,
    #[strum(serialize = "KPW")]
    Kpw,
    #[strum(serialize = "KRW")]
    Krw,
    #[strum(serialize = "KWD")]
    Kwd,
    #[strum(serialize = "KYD")]
    Kyd,
    #[strum(serialize = "KZT")]
    Kzt,
    #[strum(serialize = "LAK")]
    Lak,
    #[strum(serialize = "LBP")]
    Lbp,
    #[strum(serialize = "LKR")]
    Lkr,
    #[strum(serialize = "LRD")]
    Lrd,
    #[strum(serialize = "LSL")]
    Lsl,
    #[strum(serialize = "LYD")]
    Lyd,
    #[strum(serialize = "MAD")]
    Mad,
    #[strum(serialize = "MDL")]
    Mdl,
    #[strum(serialize = "MGA")]
    Mga,
    #[strum(serialize = "MKD")]
    Mkd,
    #[strum(serialize = "MMK")]
    Mmk,
    #[strum(serialize = "MNT")]
    Mnt,
    #[strum(serialize = "MOP")]
    Mop,
    #[strum(serialize = "MRU")]
    Mru,
    #[strum(serialize = "MUR")]
    Mur,
    #[strum(serialize = "MVR")]
    Mvr,
    #[strum(serialize = "MWK")]
    Mwk,
    #[strum(serialize = "MXN")]
    Mxn,
    #[strum(serialize = "MYR")]
    Myr,
    #[strum(serialize = "MZN")]
    Mzn,
    #[strum(serialize = "NAD")]
    Nad,
    #[strum(serialize = "NGN")]
    Ngn,
    #[strum(serialize = "NIO")]
    Nio,
    #[strum(serialize = "NOK")]
    Nok,
    #[strum(serialize = "NPR")]
    Npr,
    #[strum(serialize = "NZD")]
    Nzd,
    #[strum(serialize = "OMR")]
    Omr,
    #[strum(serialize = "PAB")]
    Pab,
    #[strum(serialize = "PEN")]
    Pen,
    #[strum(serialize = "PGK")]
    Pgk,
    #[strum(serialize = "PHP")]
    Php,
    #[strum(serialize = "PKR")]
    Pkr,
    #[strum(serialize = "PLN")]
    Pln,
    #[strum(serialize = "PYG")]
    Pyg,
    #[strum(serialize = "QAR")]
    Qar,
    #[strum(serialize = "RON")]
    Ron,
    #[strum(serialize = "RSD")]
    Rsd,
    #[strum(serialize = "RUB")]
    Rub,
    #[strum(serialize = "RWF")]
    Rwf,
    #[strum(serialize = "SAR")]
    Sar,
    #[strum(serialize = "SBD")]
    Sbd,
    #[strum(serialize = "SCR")]
    Scr,
    #[strum(serialize = "SDG")]
    Sdg,
    #[strum(serialize = "SEK")]
    Sek,
    #[strum(serialize = "SGD")]
    Sgd,
    #[strum(serialize = "SHP")]
    Shp,
    #[strum(serialize = "SLE")]
    Sle,
    #[strum(serialize = "SOS")]
    Sos,
    #[strum(serialize = "SRD")]
    Srd,
    #[strum(serialize = "SSP")]
    Ssp,
    #[strum(serialize = "STN")]
    Stn,
    #[strum(serialize = "SVC")]
    Svc,
    #[strum(serialize = "SYP")]
    Syp,
    #[strum(serialize = "SZL")]
    Szl,
    #[strum(serialize = "THB")]
    Thb,
    #[strum(serialize = "TJS")]
    Tjs,
    #[strum(serialize = "TMT")]
    Tmt,
    #[strum(serialize = "TND")]
    Tnd,
    #[strum(serialize = "TOP")]
    Top,
    #[strum(serialize = "TRY")]
    Try,
    #[strum(serialize = "TTD")]
    Ttd,
    #[strum(serialize = "TWD")]
    Twd,
    #[strum(serialize = "TZS")]
    Tzs,
    #[strum(serialize = "UAH")]
    Uah,
    #[strum(serialize = "UGX")]
    Ugx,
    #[strum(serialize = "USD")]
    Usd,
    #[strum(serialize = "UYU")]
    Uyu,
    #[strum(serialize = "UZS")]
    Uzs,
    #[strum(serialize = "VES")]
    Ves,
    #[strum(serialize = "VND")]
    Vnd,
    #[strum(serialize = "VUV")]
    Vuv,
    #[strum(serialize = "WST")]
    Wst,
    #[strum(serialize = "XAF")]
    Xaf,
    #[strum(serialize = "XCD")]
    Xcd,
    #[strum(serialize = "XOF")]
    Xof,
    #[strum(serialize = "XPF")]
    Xpf,
    #[strum(serialize = "YER")]
    Yer,
    #[strum(serialize = "ZAR")]
    Zar,
    #[strum(serialize = "ZMW")]
    Zmw,
    #[strum(serialize = "ZWL")]
    Zwl,
}

impl CurrencyCode {
    /// Parses an order's currency code, failing with `InvalidArgument` for
    /// codes the processor does not know.
    pub fn parse(code: &str) -> Result<Self, GatewayError> {
        Self::from_str(code.trim()).map_err(|_| {
            GatewayError::InvalidArgument(format!("unsupported currency code '{code}'"))
        })
    }
}

/// An amount tagged with its currency, as sent in payment details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicAmount {
    pub currency: CurrencyCode,
    /// Already formatted with [`Money::to_processor_string`].
    pub value: String,
}

impl BasicAmount {
    pub fn new(currency: CurrencyCode, amount: Money) -> Self {
        Self {
            currency,
            value: amount.to_processor_string(),
        }
    }
}
