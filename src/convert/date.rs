//! Поддержка столбцов `DATE` через типы ящика `chrono`. Дата передается во внутреннем 7-байтовом формате
//! Oracle (`SQLT_DAT`): век и год со смещением 100, месяц, день, а также часы, минуты и секунды со смещением 1.

use ::chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use num_integer::div_rem;

use crate::Result;
use crate::error::Error;
use crate::types::Type;

use super::{FromDB, ToDB, Value};

/// Кодирует дату во внутренний формат Oracle. Поддерживаются только годы нашей эры до 9999 включительно,
/// для остальных возвращается `None`.
pub fn encode_date(d: &NaiveDateTime) -> Option<[u8; 7]> {
  let year = d.year();
  if year < 1 || year > 9999 {
    return None;
  }
  let (century, year) = div_rem(year, 100);
  Some([
    (century + 100) as u8,
    (year + 100) as u8,
    d.month() as u8,
    d.day() as u8,
    (d.hour() + 1) as u8,
    (d.minute() + 1) as u8,
    (d.second() + 1) as u8,
  ])
}
/// Раскодирует дату из внутреннего формата Oracle.
pub fn decode_date(raw: &[u8]) -> Result<NaiveDateTime> {
  let err = Error::Conversion(Type::DAT);
  if raw.len() != 7 || raw[0] < 100 || raw[1] < 100 || raw[4] < 1 || raw[5] < 1 || raw[6] < 1 {
    return Err(err);
  }
  let year = (raw[0] as i32 - 100) * 100 + (raw[1] as i32 - 100);
  let date = NaiveDate::from_ymd_opt(year, raw[2] as u32, raw[3] as u32).ok_or(Error::Conversion(Type::DAT))?;
  let time = NaiveTime::from_hms_opt(raw[4] as u32 - 1, raw[5] as u32 - 1, raw[6] as u32 - 1).ok_or(err)?;
  Ok(NaiveDateTime::new(date, time))
}

impl ToDB for NaiveDateTime {
  #[inline]
  fn ty() -> Type { Type::DAT }
  #[inline]
  fn to_db(&self) -> Value {
    Value::Date(*self)
  }
}
impl ToDB for NaiveDate {
  #[inline]
  fn ty() -> Type { Type::DAT }
  #[inline]
  fn to_db(&self) -> Value {
    Value::Date(self.and_time(NaiveTime::MIN))
  }
}
impl FromDB for NaiveDateTime {
  fn from_db(ty: Type, raw: &[u8]) -> Result<Self> {
    match ty {
      Type::DAT => decode_date(raw),
      t => Err(Error::Conversion(t)),
    }
  }
}
impl FromDB for NaiveDate {
  fn from_db(ty: Type, raw: &[u8]) -> Result<Self> {
    NaiveDateTime::from_db(ty, raw).map(|d| d.date())
  }
}
