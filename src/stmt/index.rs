//! Содержит структуры и типажи, предназначенные для унифицированного представления индексаторов.
use std::fmt;

use super::Column;

/// Типаж, позволяющий указать типы, которые можно использовать для индексации набора полей, полученных из базы данных,
/// для извлечения данных. Наиболее типичное применение -- использование индекса или имени колонки для извлечения данных.
/// Благодаря типажу для этого можно использовать одну и ту же функцию [`get()`][get].
///
/// [get]: ../struct.DataReader.html#method.get
pub trait RowIndex {
  /// Превращает объект в индекс (нумерация с 0), по которому можно извлечь данные, или в `None`, если нет индекса,
  /// соответствующего данному объекту. В этом случае при получении данных из столбца метод [`get()`][get] вернет
  /// ошибку [`InvalidColumn`][err].
  ///
  /// [get]: ../struct.DataReader.html#method.get
  /// [err]: ../../error/enum.Error.html#variant.InvalidColumn
  fn idx(&self, columns: &[Column]) -> Option<usize>;
}

impl RowIndex for usize {
  fn idx(&self, columns: &[Column]) -> Option<usize> {
    if *self >= columns.len() {
      return None;
    }
    Some(*self)
  }
}
impl<'a> RowIndex for &'a str {
  /// Имена, не взятые в кавычки при создании таблицы, хранятся в верхнем регистре, поэтому при отсутствии
  /// точного совпадения имя ищется без учета регистра.
  fn idx(&self, columns: &[Column]) -> Option<usize> {
    columns.iter().position(|c| c.name == *self)
      .or_else(|| columns.iter().position(|c| c.name.eq_ignore_ascii_case(self)))
  }
}

/// Обобщенный индекс связываемых параметров. Позволяет связывать параметры как по позиции,
/// так и по имени, используя один и тот же вызов [`bind`][1], перегруженный по принимаемым аргументам.
///
/// [1]: ../struct.Statement.html#method.bind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindIndex<'a> {
  /// Связывание осуществляется по имени переменной, например, `:id`. Двоеточие можно не указывать.
  Name(&'a str),
  /// Связывание осуществляется по позиции переменной. Как и в API оракла, нумерация с 1.
  Index(usize)
}
impl<'a> BindIndex<'a> {
  /// Получает владеющую копию индекса для хранения вместе со связанными данными.
  pub(crate) fn to_key(self) -> BindKey {
    match self {
      BindIndex::Name(name) => BindKey::Name(name.trim_start_matches(':').to_owned()),
      BindIndex::Index(pos) => BindKey::Index(pos),
    }
  }
}
impl<'a> fmt::Display for BindIndex<'a> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      BindIndex::Name(name) => write!(f, "{}", name),
      BindIndex::Index(pos) => write!(f, "{}", pos),
    }
  }
}

impl<'a> From<usize> for BindIndex<'a> {
  fn from(t: usize) -> Self {
    BindIndex::Index(t)
  }
}
impl<'a> From<&'a str> for BindIndex<'a> {
  fn from(t: &'a str) -> Self {
    BindIndex::Name(t)
  }
}

/// Владеющий вариант [`BindIndex`](enum.BindIndex.html), под которым выражение хранит связанные данные.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BindKey {
  Name(String),
  Index(usize),
}
