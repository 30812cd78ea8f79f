use crate::Result;
use crate::convert::FromDB;
use crate::error::Error;
use crate::types::ExecuteMode;

use super::{Column, Define, Statement, StatementState};
use super::index::RowIndex;

/// Последовательное чтение строк результата запроса. Читатель заимствует выражение на все время чтения,
/// поэтому выполнить его повторно или связать новые параметры, пока строки не прочитаны, нельзя.
///
/// # Пример
/// ```ignore
/// let mut stmt = conn.prepare("select id, name from users")?;
/// let mut reader = DataReader::new(&mut stmt);
/// reader.initialize_defines()?;
/// while reader.read()? {
///   let id: Option<i64> = reader.get(0)?;
///   let name: Option<String> = reader.get("NAME")?;
/// }
/// ```
#[derive(Debug)]
pub struct DataReader<'s, 'c: 's> {
  stmt: &'s mut Statement<'c>,
  /// Описание столбцов в порядке списка выбора, заполняется в `initialize_defines()`
  columns: Vec<Column>,
}
impl<'s, 'c: 's> DataReader<'s, 'c> {
  /// Создает читатель для подготовленного или уже выполненного выражения.
  pub fn new(stmt: &'s mut Statement<'c>) -> Self {
    DataReader { stmt: stmt, columns: Vec::new() }
  }
  /// Выясняет форму результата и создает буферы для всех столбцов списка выбора. Если выражение еще не
  /// выполнялось, оно выполняется в режиме описания, без извлечения строк. Столбцы, для которых буферы уже
  /// созданы вызовом [`Statement::define()`][1], пропускаются.
  ///
  /// [1]: struct.Statement.html#method.define
  pub fn initialize_defines(&mut self) -> Result<()> {
    match self.stmt.state() {
      StatementState::Prepared => { self.stmt.execute(ExecuteMode::DescribeOnly)?; },
      s if s.is_executed() => {},
      s => return Err(Error::State { operation: "initialize_defines", state: s }),
    }
    let count = self.stmt.descriptor_count()? as usize;
    let mut columns = Vec::with_capacity(count);
    for pos in 1..=count {
      let column = match self.stmt.define_at(pos) {
        Some(define) => define.column().clone(),
        None => self.stmt.define(pos)?.column().clone(),
      };
      columns.push(column);
    }
    self.columns = columns;
    Ok(())
  }
  /// Извлекает следующую строку. Возвращает `false`, когда строк больше нет. Если выражение было выполнено
  /// только для описания, перед первым извлечением оно выполняется полностью.
  ///
  /// # Запросы к серверу (0..1)
  /// Одно полное выполнение при необходимости и один `OCIStmtFetch2()` на вызов.
  pub fn read(&mut self) -> Result<bool> {
    if self.columns.is_empty() {
      self.initialize_defines()?;
    }
    if self.stmt.state() == StatementState::Executed(ExecuteMode::DescribeOnly) {
      self.stmt.execute(ExecuteMode::Full)?;
    }
    self.stmt.fetch()
  }
  /// Описание столбцов результата в порядке списка выбора
  #[inline]
  pub fn columns(&self) -> &[Column] {
    &self.columns
  }
  /// Выражение, из которого читаются строки
  #[inline]
  pub fn statement(&self) -> &Statement<'c> {
    &*self.stmt
  }
  fn define<I: RowIndex>(&self, operation: &'static str, index: I) -> Result<&Define> {
    let state = self.stmt.state();
    if state != StatementState::Fetching {
      return Err(Error::State { operation: operation, state: state });
    }
    let idx = index.idx(&self.columns).ok_or(Error::InvalidColumn)?;
    self.stmt.define_at(idx + 1).ok_or(Error::InvalidColumn)
  }
  /// Получает значение столбца текущей строки по его индексу (нумерация с 0) или имени. Для `NULL`
  /// возвращает `None`.
  pub fn get<T: FromDB, I: RowIndex>(&self, index: I) -> Result<Option<T>> {
    self.define("get", index)?.get()
  }
  /// Проверяет, содержит ли столбец текущей строки `NULL`.
  pub fn is_null<I: RowIndex>(&self, index: I) -> Result<bool> {
    Ok(self.define("is_null", index)?.is_null())
  }
  /// Получает значение столбца типа `ROWID` текущей строки в текстовом виде.
  pub fn rowid<I: RowIndex>(&self, index: I) -> Result<Option<String>> {
    let define = self.define("rowid", index)?;
    define.rowid(self.stmt.connection().error())
  }
}
