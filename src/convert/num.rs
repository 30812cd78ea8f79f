//! Извлечение чисел из буферов с внешними типами `SQLT_INT`, `SQLT_UIN`, `SQLT_BFLOAT` и `SQLT_BDOUBLE`.

use std::convert::TryInto;

use num_traits::{NumCast, ToPrimitive};

use crate::Result;
use crate::error::Error;
use crate::types::Type;

use super::FromDB;

/// Число, прочитанное из буфера в наиболее широком представлении своего вида.
enum Wide {
  Signed(i64),
  Unsigned(u64),
  Float(f64),
}
impl Wide {
  fn read(ty: Type, raw: &[u8]) -> Result<Self> {
    let err = || Error::Conversion(ty);
    Ok(match (ty, raw.len()) {
      (Type::INT, 1) => Wide::Signed(i8::from_ne_bytes(raw.try_into().map_err(|_| err())?) as i64),
      (Type::INT, 2) => Wide::Signed(i16::from_ne_bytes(raw.try_into().map_err(|_| err())?) as i64),
      (Type::INT, 4) => Wide::Signed(i32::from_ne_bytes(raw.try_into().map_err(|_| err())?) as i64),
      (Type::INT, 8) => Wide::Signed(i64::from_ne_bytes(raw.try_into().map_err(|_| err())?)),
      (Type::UIN, 1) => Wide::Unsigned(raw[0] as u64),
      (Type::UIN, 2) => Wide::Unsigned(u16::from_ne_bytes(raw.try_into().map_err(|_| err())?) as u64),
      (Type::UIN, 4) => Wide::Unsigned(u32::from_ne_bytes(raw.try_into().map_err(|_| err())?) as u64),
      (Type::UIN, 8) => Wide::Unsigned(u64::from_ne_bytes(raw.try_into().map_err(|_| err())?)),
      (Type::BFLOAT, 4) |
      (Type::IBFLOAT, 4) => Wide::Float(f32::from_ne_bytes(raw.try_into().map_err(|_| err())?) as f64),
      (Type::BDOUBLE, 8) |
      (Type::IBDOUBLE, 8) => Wide::Float(f64::from_ne_bytes(raw.try_into().map_err(|_| err())?)),
      _ => return Err(err()),
    })
  }
  /// Приводит число к целевому типу без потери точности. Дробные числа приводятся к целым только
  /// если у них нет дробной части.
  fn cast<T: NumCast>(self, ty: Type) -> Result<T> {
    let res = match self {
      Wide::Signed(v) => <T as NumCast>::from(v),
      Wide::Unsigned(v) => <T as NumCast>::from(v),
      Wide::Float(v) => <T as NumCast>::from(v),
    };
    res.ok_or(Error::Conversion(ty))
  }
}

macro_rules! int_from_db {
  ($($ty:ty),+) => (
    $(
      impl FromDB for $ty {
        fn from_db(ty: Type, raw: &[u8]) -> Result<Self> {
          match Wide::read(ty, raw)? {
            Wide::Float(v) if v.fract() != 0.0 => Err(Error::Conversion(ty)),
            w => w.cast(ty),
          }
        }
      }
    )+
  );
}
int_from_db!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromDB for f64 {
  fn from_db(ty: Type, raw: &[u8]) -> Result<Self> {
    Wide::read(ty, raw)?.cast(ty)
  }
}
impl FromDB for f32 {
  fn from_db(ty: Type, raw: &[u8]) -> Result<Self> {
    match Wide::read(ty, raw)? {
      // Точность одинарных чисел не проверяется, как и при обычном `as`
      Wide::Float(v) => v.to_f32().ok_or(Error::Conversion(ty)),
      w => w.cast(ty),
    }
  }
}
impl FromDB for bool {
  fn from_db(ty: Type, raw: &[u8]) -> Result<Self> {
    match Wide::read(ty, raw)? {
      Wide::Signed(v) => Ok(v != 0),
      Wide::Unsigned(v) => Ok(v != 0),
      Wide::Float(_) => Err(Error::Conversion(ty)),
    }
  }
}
