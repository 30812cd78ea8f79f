//! Содержит код для преобразованием между типами Rust и типами базы данных.
//!
//! Значения, передаваемые в базу, представляются закрытым перечислением [`Value`][1], в котором каждый
//! вариант однозначно определяет внешний тип OCI и размер буфера. Значения, извлекаемые из базы, получаются
//! из буфера столбца через типаж [`FromDB`][2].
//!
//! [1]: enum.Value.html
//! [2]: trait.FromDB.html

use std::str;

use crate::Result;
use crate::error::Error;
use crate::types::Type;

mod num;
#[cfg(feature = "with-chrono")]
mod date;

#[cfg(feature = "with-chrono")]
pub use self::date::{decode_date, encode_date};

/// Преобразует тип базы данных в тип Rust, для которого реализован данный типаж.
pub trait FromDB : Sized {
  /// Преобразует данные, извлеченные из базы данных, в конкретный тип, если это преобразование
  /// возможно. Если преобразование невозможно, или в процессе преобразования возникает ошибка,
  /// возвращает `Err`.
  ///
  /// # Параметры
  /// - `ty`:
  ///   Внешний тип данных, в котором данные были извлечены в буфер
  /// - `raw`:
  ///   Слепок данных для значения указанного типа, которое необходимо преобразовать в Rust-тип.
  fn from_db(ty: Type, raw: &[u8]) -> Result<Self>;
}

/// Преобразует тип Rust в значение, которое можно связать с параметром выражения.
pub trait ToDB {
  /// Внешний тип, в котором значение передается в базу. Используется для `NULL`-значений, у которых
  /// нет данных, по которым можно определить тип.
  fn ty() -> Type;
  /// Преобразует данное значение в представление для связывания.
  fn to_db(&self) -> Value;
}

//-------------------------------------------------------------------------------------------------
/// Значение, связываемое с параметром выражения. Вариант определяет внешний тип OCI и размер данных,
/// которые будут переданы нативной библиотеке.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  /// `NULL` указанного типа
  Null(Type),
  /// Логическое значение, передается как целое число из одного байта
  Bool(bool),
  /// `SQLT_INT`, 1 байт
  I8(i8),
  /// `SQLT_INT`, 2 байта
  I16(i16),
  /// `SQLT_INT`, 4 байта
  I32(i32),
  /// `SQLT_INT`, 8 байт
  I64(i64),
  /// `SQLT_UIN`, 1 байт
  U8(u8),
  /// `SQLT_UIN`, 2 байта
  U16(u16),
  /// `SQLT_UIN`, 4 байта
  U32(u32),
  /// `SQLT_UIN`, 8 байт
  U64(u64),
  /// `SQLT_BFLOAT`
  F32(f32),
  /// `SQLT_BDOUBLE`
  F64(f64),
  /// Строка в кодировке клиента, `SQLT_CHR`
  Text(String),
  /// Двоичные данные, `SQLT_BIN`
  Raw(Vec<u8>),
  /// Дата в 7-байтовом формате Oracle, `SQLT_DAT`
  #[cfg(feature = "with-chrono")]
  Date(::chrono::NaiveDateTime),
}
impl Value {
  /// Внешний тип OCI, в котором значение передается в базу.
  pub fn ty(&self) -> Type {
    match *self {
      Value::Null(ty) => ty,
      Value::Bool(_) |
      Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => Type::INT,
      Value::U8(_) | Value::U16(_) | Value::U32(_) | Value::U64(_) => Type::UIN,
      Value::F32(_) => Type::BFLOAT,
      Value::F64(_) => Type::BDOUBLE,
      Value::Text(_) => Type::CHR,
      Value::Raw(_) => Type::BIN,
      #[cfg(feature = "with-chrono")]
      Value::Date(_) => Type::DAT,
    }
  }
  /// Признак `NULL`-значения
  #[inline]
  pub fn is_null(&self) -> bool {
    match *self {
      Value::Null(_) => true,
      _ => false,
    }
  }
  /// Представление значения в памяти в том виде, в каком его ожидает нативная библиотека.
  /// Для `NULL` возвращается пустой вектор. Даты, которые нельзя записать во внутреннем формате Oracle,
  /// дают ошибку [`Conversion`][1].
  ///
  /// [1]: ../error/enum.Error.html#variant.Conversion
  pub fn to_bytes(&self) -> Result<Vec<u8>> {
    Ok(match *self {
      Value::Null(_) => Vec::new(),
      Value::Bool(v) => vec![v as u8],
      Value::I8(v)  => v.to_ne_bytes().to_vec(),
      Value::I16(v) => v.to_ne_bytes().to_vec(),
      Value::I32(v) => v.to_ne_bytes().to_vec(),
      Value::I64(v) => v.to_ne_bytes().to_vec(),
      Value::U8(v)  => v.to_ne_bytes().to_vec(),
      Value::U16(v) => v.to_ne_bytes().to_vec(),
      Value::U32(v) => v.to_ne_bytes().to_vec(),
      Value::U64(v) => v.to_ne_bytes().to_vec(),
      Value::F32(v) => v.to_ne_bytes().to_vec(),
      Value::F64(v) => v.to_ne_bytes().to_vec(),
      Value::Text(ref s) => s.as_bytes().to_vec(),
      Value::Raw(ref b) => b.clone(),
      #[cfg(feature = "with-chrono")]
      Value::Date(ref d) => encode_date(d).ok_or(Error::Conversion(Type::DAT))?.to_vec(),
    })
  }
}
impl FromDB for Value {
  /// Восстанавливает значение по внешнему типу буфера. Целые числа восстанавливаются в вариант,
  /// соответствующий размеру буфера.
  fn from_db(ty: Type, raw: &[u8]) -> Result<Self> {
    Ok(match (ty, raw.len()) {
      (Type::INT, 1) => Value::I8(FromDB::from_db(ty, raw)?),
      (Type::INT, 2) => Value::I16(FromDB::from_db(ty, raw)?),
      (Type::INT, 4) => Value::I32(FromDB::from_db(ty, raw)?),
      (Type::INT, 8) => Value::I64(FromDB::from_db(ty, raw)?),
      (Type::UIN, 1) => Value::U8(FromDB::from_db(ty, raw)?),
      (Type::UIN, 2) => Value::U16(FromDB::from_db(ty, raw)?),
      (Type::UIN, 4) => Value::U32(FromDB::from_db(ty, raw)?),
      (Type::UIN, 8) => Value::U64(FromDB::from_db(ty, raw)?),
      (Type::BFLOAT, _) |
      (Type::IBFLOAT, _) => Value::F32(FromDB::from_db(ty, raw)?),
      (Type::BDOUBLE, _) |
      (Type::IBDOUBLE, _) => Value::F64(FromDB::from_db(ty, raw)?),
      (Type::CHR, _) | (Type::AFC, _) | (Type::STR, _) | (Type::VCS, _) => Value::Text(FromDB::from_db(ty, raw)?),
      (Type::BIN, _) | (Type::LBI, _) => Value::Raw(raw.to_vec()),
      #[cfg(feature = "with-chrono")]
      (Type::DAT, _) => Value::Date(FromDB::from_db(ty, raw)?),
      (t, _) => return Err(Error::Conversion(t)),
    })
  }
}

impl<'a, T: ToDB + ?Sized> ToDB for &'a T {
  #[inline]
  fn ty() -> Type { T::ty() }
  #[inline]
  fn to_db(&self) -> Value {
    (**self).to_db()
  }
}
impl<T: ToDB> ToDB for Option<T> {
  #[inline]
  fn ty() -> Type {
    T::ty()
  }
  #[inline]
  fn to_db(&self) -> Value {
    match *self {
      Some(ref v) => v.to_db(),
      None => Value::Null(T::ty()),
    }
  }
}
impl ToDB for Value {
  /// Тип значения известен только для конкретного экземпляра, поэтому `NULL` без значения считается строкой.
  #[inline]
  fn ty() -> Type { Type::CHR }
  #[inline]
  fn to_db(&self) -> Value {
    self.clone()
  }
}

macro_rules! scalar_to_db {
  ($($ty:ty => $variant:ident, $code:ident;)+) => (
    $(
      impl ToDB for $ty {
        #[inline]
        fn ty() -> Type { Type::$code }
        #[inline]
        fn to_db(&self) -> Value { Value::$variant(*self) }
      }
    )+
  );
}
scalar_to_db!(
  bool => Bool, INT;
  i8   => I8,   INT;
  i16  => I16,  INT;
  i32  => I32,  INT;
  i64  => I64,  INT;
  u8   => U8,   UIN;
  u16  => U16,  UIN;
  u32  => U32,  UIN;
  u64  => U64,  UIN;
  f32  => F32,  BFLOAT;
  f64  => F64,  BDOUBLE;
);
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Строки
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
impl ToDB for str {
  #[inline]
  fn ty() -> Type { Type::CHR }
  #[inline]
  fn to_db(&self) -> Value {
    Value::Text(self.to_owned())
  }
}
impl ToDB for String {
  #[inline]
  fn ty() -> Type { Type::CHR }
  #[inline]
  fn to_db(&self) -> Value {
    Value::Text(self.clone())
  }
}
impl FromDB for String {
  fn from_db(ty: Type, raw: &[u8]) -> Result<Self> {
    match ty {
      Type::CHR |
      Type::AFC |
      Type::STR |
      Type::VCS => {
        // Строки фиксированной длины могут быть дополнены нулями
        let len = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        str::from_utf8(&raw[..len]).map(str::to_owned).map_err(|_| Error::Conversion(ty))
      },
      t => Err(Error::Conversion(t)),
    }
  }
}
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Двоичные данные
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
impl ToDB for [u8] {
  #[inline]
  fn ty() -> Type { Type::BIN }
  #[inline]
  fn to_db(&self) -> Value {
    Value::Raw(self.to_vec())
  }
}
impl ToDB for Vec<u8> {
  #[inline]
  fn ty() -> Type { Type::BIN }
  #[inline]
  fn to_db(&self) -> Value {
    Value::Raw(self.clone())
  }
}
impl FromDB for Vec<u8> {
  fn from_db(ty: Type, raw: &[u8]) -> Result<Self> {
    match ty {
      Type::BIN |
      Type::LBI |
      Type::VBI => Ok(raw.to_vec()),
      t => Err(Error::Conversion(t)),
    }
  }
}
