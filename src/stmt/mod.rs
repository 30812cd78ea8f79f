//! Содержит определение подготовленных выражений, которые используются для эффективного исполнения запросов,
//! и структур, связанных с ними.
//!
//! Выражение проходит через состояния [`StatementState`][1]: подготовка, связывание параметров, выполнение
//! (только описание или полное), извлечение строк. Каждая операция проверяет, что выражение находится в
//! допустимом для нее состоянии, и возвращает ошибку [`Error::State`][2] в противном случае.
//!
//! [1]: enum.StatementState.html
//! [2]: ../error/enum.Error.html#variant.State
pub mod index;
mod bind;
mod define;
mod reader;

use std::collections::BTreeMap;
use std::os::raw::{c_uint, c_void};
use std::ptr;

use log::{debug, warn};

use crate::{Result, ServiceContext};
use crate::convert::{FromDB, ToDB, Value};
use crate::error::Error;
use crate::ffi::{AttrHolder, Descriptor, ErrorHandle, Oci, Param};
use crate::ffi::{OCIRowid, OCIStmt};
use crate::ffi::types::{execute_mode, fetch_orientation, status, Attr, ParamAttr};
use crate::object::ObjectType;
use crate::types::{CharsetForm, ExecuteMode, HandleType, StatementType, Syntax, Type};

pub use self::bind::{ArrayBind, Bind, DescriptorBind, DescriptorStorage, ObjectBind, ScalarBind};
pub use self::define::{CollectionDefine, Define, DescriptorDefine, ObjectDefine, ScalarDefine};
pub use self::index::{BindIndex, RowIndex};
pub use self::reader::DataReader;

use self::bind::{descriptor_kind, out_size};
use self::index::BindKey;

//-------------------------------------------------------------------------------------------------
/// Состояние выражения.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatementState {
  /// Выражение создано, но текст запроса еще не разобран
  Unprepared,
  /// Запрос разобран, можно связывать параметры
  Prepared,
  /// Запрос выполнен в указанном режиме
  Executed(ExecuteMode),
  /// Извлечена как минимум одна строка
  Fetching,
  /// Все строки извлечены
  Exhausted,
  /// Нативный вызов выполнения или извлечения завершился ошибкой. Выражение нужно подготовить заново
  Closed,
}
impl StatementState {
  /// Признак того, что выражение уже выполнялось и сервер вернул описание списка выбора.
  #[inline]
  pub fn is_executed(self) -> bool {
    match self {
      StatementState::Executed(_) |
      StatementState::Fetching |
      StatementState::Exhausted => true,
      _ => false,
    }
  }
}
impl Default for StatementState {
  fn default() -> Self { StatementState::Unprepared }
}

//-------------------------------------------------------------------------------------------------
/// Структура для представления колонки базы данных из списка выбора
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
  /// Порядковый номер колонки в списке выбора (нумерация с 0)
  pub pos: usize,
  /// Название колонки в списке выбора (т.е. либо название колонки в базе данных, либо ее псевдоним).
  pub name: String,
  /// Код типа колонки в базе данных. Хранится как есть, т.к. сервер может вернуть тип, неизвестный библиотеке.
  pub data_type: u16,
  /// Ширина колонки в байтах. Показывает, сколько байт максимум может занимать значение колонки,
  /// а не занимаемый реально данными объем.
  pub size: u16,
  /// Количество десятичных цифр для представления чисел для числовых данных.
  /// Количество десятичных цифр, отводимых под год/день для интервальных типов.
  pub precision: i16,
  /// Количество цифр после десятичной точки. `-127` для чисел с плавающей точкой.
  pub scale: i8,
  /// Допускает ли колонка `NULL`-значения
  pub nullable: bool,
  /// Используется ли символьная семантика длины. В этом случае длина колонки в символах находится в `char_size`
  pub char_used: bool,
  /// Длина колонки в символах
  pub char_size: u16,
  /// Форма набора символов колонки
  pub charset_form: CharsetForm,
  /// Имя пользовательского типа для колонок объектных типов, иначе пустая строка
  pub type_name: String,
  /// Схема пользовательского типа для колонок объектных типов, иначе пустая строка
  pub schema_name: String,
}
impl Column {
  /// Читает описание колонки из дескриптора параметра списка выбора.
  fn new(pos: usize, param: &Param) -> Result<Self> {
    let err = param.error();
    let data_type: u16 = param.get_(ParamAttr::DataType, err)?;
    let (type_name, schema_name) = match Type::from_code(data_type) {
      Some(Type::NTY) | Some(Type::REF) | Some(Type::NCO) => (
        param.get_str(ParamAttr::TypeName, err)?,
        param.get_str(ParamAttr::SchemaName, err)?,
      ),
      _ => (String::new(), String::new()),
    };
    let form: u8 = param.get_(ParamAttr::CharsetForm, err)?;
    let nullable: u8 = param.get_(ParamAttr::IsNull, err)?;
    let char_used: u8 = param.get_(ParamAttr::CharUsed, err)?;

    Ok(Column {
      pos: pos,
      name: param.get_str(ParamAttr::Name, err)?,
      data_type: data_type,
      size: param.get_(ParamAttr::DataSize, err)?,
      precision: param.get_(ParamAttr::Precision, err)?,
      scale: param.get_(ParamAttr::Scale, err)?,
      nullable: nullable != 0,
      char_used: char_used != 0,
      char_size: param.get_(ParamAttr::CharSize, err)?,
      charset_form: CharsetForm::from_code(form).unwrap_or_default(),
      type_name: type_name,
      schema_name: schema_name,
    })
  }
  /// Тип колонки, если он известен библиотеке
  #[inline]
  pub fn ty(&self) -> Option<Type> {
    Type::from_code(self.data_type)
  }
}
#[cfg(test)]
impl Column {
  pub(crate) fn new_for_tests(pos: usize, ty: Type) -> Self {
    Column {
      pos: pos,
      name: format!("COL{}", pos),
      data_type: ty.code(),
      size: 0,
      precision: 0,
      scale: 0,
      nullable: true,
      char_used: false,
      char_size: 0,
      charset_form: CharsetForm::Unspecified,
      type_name: String::new(),
      schema_name: String::new(),
    }
  }
}

/// Индикатор `NULL`, длина значения и код возврата колонки, заполняемые нативной библиотекой.
/// Всегда хранится в куче, т.к. нативная библиотека запоминает адреса полей.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Indicator {
  pub ind: i16,
  pub len: u32,
  pub code: u16,
}

/// Преобразует дескриптор `ROWID` в текстовое представление вызовом `OCIRowidToChar()`.
pub(crate) fn rowid_to_string(api: &dyn Oci, rowid: *mut OCIRowid, err: &ErrorHandle) -> Result<String> {
  let mut buf = vec![0u8; 4000];
  let mut len = buf.len() as u16;
  let res = unsafe { api.rowid_to_char(rowid, buf.as_mut_ptr(), &mut len, err.native_mut()) };
  err.check(res)?;
  buf.truncate(len as usize);
  Ok(String::from_utf8_lossy(&buf).into_owned())
}

//-------------------------------------------------------------------------------------------------
/// Подготовленное выражение.
#[derive(Debug)]
pub struct Statement<'c> {
  /// Соединение, которое подготовило данное выражение
  conn: &'c ServiceContext<'c>,
  /// Внутренний указатель оракла на подготовленное выражение
  native: *mut OCIStmt,
  sql: String,
  state: StatementState,
  /// Связанные параметры в порядке связывания. Повторное связывание того же индекса заменяет запись
  binds: Vec<(BindKey, Bind)>,
  /// Количество строк в связанных массивах, если они есть
  batch: Option<u32>,
  /// Буферы для извлечения колонок, по номеру колонки (нумерация с 1)
  defines: BTreeMap<usize, Define>,
}
impl<'c> Statement<'c> {
  pub(crate) fn new(conn: &'c ServiceContext<'c>) -> Self {
    Statement {
      conn: conn,
      native: ptr::null_mut(),
      sql: String::new(),
      state: StatementState::Unprepared,
      binds: Vec::new(),
      batch: None,
      defines: BTreeMap::new(),
    }
  }
  /// Получает хендл для записи ошибок во время общения с базой данных. Хендл берется из соединения, которое породило
  /// данное выражение.
  #[inline]
  fn error(&self) -> &ErrorHandle {
    self.conn.error()
  }
  /// Возвращает ошибку, если выражение не находится в одном из допустимых для операции состояний.
  fn require(&self, operation: &'static str, allowed: bool) -> Result<()> {
    if allowed {
      return Ok(());
    }
    Err(Error::State { operation: operation, state: self.state })
  }
  fn release(&mut self) {
    if self.native.is_null() {
      return;
    }
    let res = unsafe {
      self.conn.api().stmt_release(self.native, self.error().native_mut(), ptr::null(), 0, 0)
    };
    if let Err(e) = self.error().check(res) {
      warn!("OCIStmtRelease: {}", e);
    }
    self.native = ptr::null_mut();
  }

  /// Возвращает соединение, из которого было подготовлено данные выражение.
  #[inline]
  pub fn connection(&self) -> &'c ServiceContext<'c> {
    self.conn
  }
  /// Текущее состояние выражения
  #[inline]
  pub fn state(&self) -> StatementState {
    self.state
  }
  /// Текст последнего подготовленного запроса
  #[inline]
  pub fn sql(&self) -> &str {
    &self.sql
  }
  /// Разбирает запрос с родным для сервера синтаксисом. См. [`prepare_with_syntax`][1].
  ///
  /// [1]: #method.prepare_with_syntax
  #[inline]
  pub fn prepare(&mut self, sql: &str) -> Result<()> {
    self.prepare_with_syntax(Syntax::default(), sql)
  }
  /// Разбирает запрос. Допускается вызов в любом состоянии: ранее подготовленный хендл освобождается,
  /// а все связанные параметры и буферы колонок отбрасываются.
  ///
  /// # OCI вызовы
  /// `OCIStmtRelease()` для ранее подготовленного выражения, затем `OCIStmtPrepare2()`.
  ///
  /// # Запросы к серверу (0)
  /// Разбор запроса выполняется локально.
  pub fn prepare_with_syntax(&mut self, syntax: Syntax, sql: &str) -> Result<()> {
    self.release();
    self.binds.clear();
    self.defines.clear();
    self.batch = None;
    self.state = StatementState::Unprepared;

    let mut stmt = ptr::null_mut();
    let res = unsafe {
      self.conn.api().stmt_prepare(
        self.conn.handle(),
        &mut stmt,
        self.error().native_mut(),
        // Текст SQL запроса
        sql.as_ptr(), sql.len() as c_uint,
        // Ключ кеширования не используется
        ptr::null(), 0,
        syntax as c_uint, 0
      )
    };
    self.error().check(res)?;
    debug!("prepared: {}", sql);
    self.native = stmt;
    self.sql = sql.to_owned();
    self.state = StatementState::Prepared;
    Ok(())
  }

  fn store(&mut self, key: BindKey, bind: Bind) {
    match self.binds.iter_mut().find(|(k, _)| *k == key) {
      Some(entry) => entry.1 = bind,
      None => self.binds.push((key, bind)),
    }
  }
  /// Проверяет, что количество строк в новом массиве совпадает с уже связанными массивами.
  fn check_batch(&self, rows: u32) -> Result<()> {
    match self.batch {
      Some(expected) if expected != rows => Err(Error::BatchSize { expected: expected, actual: rows }),
      _ => Ok(()),
    }
  }
  /// Ассоциирует значение с переменной запроса. Значение копируется в буфер, принадлежащий выражению,
  /// поэтому исходная переменная может быть уничтожена сразу после вызова.
  ///
  /// # Параметры
  /// - `index`:
  ///   Порядковый номер (нумерация с 1) или символьное имя переменной в запросе.
  /// - `value`:
  ///   Связываемое значение.
  ///
  /// # OCI вызовы
  /// `OCIBindByName2()` или `OCIBindByPos2()`, в зависимости от того, какой тип параметра передан в `index`.
  ///
  /// # Запросы к серверу (0)
  /// Ни одна из вызываемых функций не выполняет запросов к серверу.
  pub fn bind<'i, I, V>(&mut self, index: I, value: &V) -> Result<()>
    where I: Into<BindIndex<'i>>,
          V: ToDB + ?Sized
  {
    self.bind_value(index.into(), value.to_db())
  }
  /// Ассоциирует с переменной запроса `NULL` указанного типа.
  #[inline]
  pub fn bind_null<'i, I: Into<BindIndex<'i>>>(&mut self, index: I, ty: Type) -> Result<()> {
    self.bind_value(index.into(), Value::Null(ty))
  }
  fn bind_value(&mut self, index: BindIndex, value: Value) -> Result<()> {
    self.bind_scalar("bind", index, value, 0)
  }
  fn bind_scalar(&mut self, operation: &'static str, index: BindIndex, value: Value, capacity: usize) -> Result<()> {
    self.require(operation, self.state == StatementState::Prepared)?;
    let bind = ScalarBind::new(&**self.conn.api(), self.native, self.error(), index, value, capacity)?;
    self.store(index.to_key(), Bind::Scalar(bind));
    Ok(())
  }
  /// Связывает с переменной PL/SQL блока буфер для выходного значения (`OUT` параметр). До выполнения
  /// в буфере `NULL`, после выполнения значение читается через [`get_out`][1].
  ///
  /// # Параметры
  /// - `ty`:
  ///   Внешний тип значения: `INT`, `UIN`, `BFLOAT`, `BDOUBLE`, `DAT`, `CHR` или `BIN`.
  /// - `capacity`:
  ///   Для целых чисел ширина в байтах (1, 2, 4 или 8), для строк и двоичных данных максимальная длина
  ///   значения в байтах. Для остальных типов игнорируется.
  ///
  /// Для неподдерживаемого типа или недопустимого размера возвращается ошибка [`Conversion`][2].
  ///
  /// [1]: #method.get_out
  /// [2]: ../error/enum.Error.html#variant.Conversion
  pub fn bind_out<'i, I: Into<BindIndex<'i>>>(&mut self, index: I, ty: Type, capacity: usize) -> Result<()> {
    let size = out_size(ty, capacity).ok_or(Error::Conversion(ty))?;
    self.bind_scalar("bind_out", index.into(), Value::Null(ty), size)
  }
  /// Связывает с переменной PL/SQL блока значение, которое блок может заменить (`IN OUT` параметр).
  /// Для строк и двоичных данных буфер расширяется до `capacity` байт, если значение короче.
  pub fn bind_in_out<'i, I, V>(&mut self, index: I, value: &V, capacity: usize) -> Result<()>
    where I: Into<BindIndex<'i>>,
          V: ToDB + ?Sized
  {
    let value = value.to_db();
    let ty = value.ty();
    let size = match ty {
      Type::CHR | Type::BIN => capacity,
      _ if value.is_null() => out_size(ty, capacity).ok_or(Error::Conversion(ty))?,
      _ => 0,
    };
    self.bind_scalar("bind_in_out", index.into(), value, size)
  }
  /// Читает значение, записанное выполненным PL/SQL блоком в буфер переменной. `None`, если блок
  /// присвоил переменной `NULL` или не присваивал ничего.
  pub fn get_out<'i, T, I>(&self, index: I) -> Result<Option<T>>
    where T: FromDB,
          I: Into<BindIndex<'i>>
  {
    self.require("get_out", self.state.is_executed())?;
    match self.bind_at(index) {
      Some(Bind::Scalar(b)) => b.get(),
      _ => Err(Error::InvalidBind),
    }
  }
  /// Ассоциирует с переменной запроса массив значений для пакетного выполнения DML. Все массивы, связанные
  /// с выражением, должны содержать одинаковое количество строк, которое станет количеством итераций
  /// при выполнении.
  pub fn bind_array<'i, I, V>(&mut self, index: I, values: &[V]) -> Result<()>
    where I: Into<BindIndex<'i>>,
          V: ToDB
  {
    self.require("bind_array", self.state == StatementState::Prepared)?;
    let rows = values.len() as u32;
    if rows == 0 {
      return Err(Error::BatchSize { expected: self.batch.unwrap_or(1), actual: 0 });
    }
    self.check_batch(rows)?;

    let values: Vec<Value> = values.iter().map(ToDB::to_db).collect();
    let ty = values.iter().find(|v| !v.is_null()).map_or(V::ty(), Value::ty);
    let index = index.into();
    let bind = ArrayBind::new(&**self.conn.api(), self.native, self.error(), index, ty, &values)?;
    self.batch = Some(rows);
    self.store(index.to_key(), Bind::Array(bind));
    Ok(())
  }
  /// Выделяет дескриптор, соответствующий внешнему типу `ty` (`CLOB`, `BLOB`, `BFILE`, `ROWID`), и связывает его
  /// с переменной запроса. Для остальных типов возвращает ошибку [`Conversion`][1].
  ///
  /// [1]: ../error/enum.Error.html#variant.Conversion
  pub fn bind_descriptor<'i, I: Into<BindIndex<'i>>>(&mut self, index: I, ty: Type) -> Result<()> {
    self.require("bind_descriptor", self.state == StatementState::Prepared)?;
    let index = index.into();
    let bind = DescriptorBind::new(self.conn.env(), self.native, self.error(), index, ty, 1)?;
    self.store(index.to_key(), Bind::Descriptor(bind));
    Ok(())
  }
  /// Выделяет `count` дескрипторов одним вызовом и связывает их с переменной запроса как массив.
  pub fn bind_descriptor_array<'i, I: Into<BindIndex<'i>>>(&mut self, index: I, ty: Type, count: usize) -> Result<()> {
    self.require("bind_descriptor_array", self.state == StatementState::Prepared)?;
    descriptor_kind(ty).ok_or(Error::Conversion(ty))?;
    if count == 0 {
      return Err(Error::BatchSize { expected: self.batch.unwrap_or(1), actual: 0 });
    }
    self.check_batch(count as u32)?;
    let index = index.into();
    let bind = DescriptorBind::new(self.conn.env(), self.native, self.error(), index, ty, count)?;
    self.batch = Some(count as u32);
    self.store(index.to_key(), Bind::Descriptor(bind));
    Ok(())
  }
  /// Связывает с переменной запроса экземпляр пользовательского типа `ty`.
  ///
  /// # Safety
  /// `instance` и `null_struct` должны указывать на экземпляр типа `ty` и его структуру индикаторов,
  /// созданные в кеше объектов, и оставаться действительными до выполнения выражения.
  pub unsafe fn bind_object<'i, I>(&mut self, index: I, ty: &ObjectType, instance: *mut c_void, null_struct: *mut c_void) -> Result<()>
    where I: Into<BindIndex<'i>>
  {
    self.require("bind_object", self.state == StatementState::Prepared)?;
    let index = index.into();
    let bind = ObjectBind::new(&**self.conn.api(), self.native, self.error(), index, ty, instance, null_struct)?;
    self.store(index.to_key(), Bind::Object(bind));
    Ok(())
  }
  /// Получает связанные с переменной данные.
  pub fn bind_at<'i, I: Into<BindIndex<'i>>>(&self, index: I) -> Option<&Bind> {
    let key = index.into().to_key();
    self.binds.iter().find(|(k, _)| *k == key).map(|(_, b)| b)
  }

  /// Получает информацию о типе выражения.
  pub fn statement_type(&self) -> Result<StatementType> {
    self.require("statement_type", !self.native.is_null())?;
    let ty: u16 = self.get_(Attr::StmtType, self.error())?;
    Ok(StatementType::from_code(ty).unwrap_or(StatementType::UNKNOWN))
  }
  /// Выполняет выражение.
  ///
  /// В режиме [`DescribeOnly`][1] запрос не выполняется, сервер только возвращает описание списка выбора.
  /// В режиме [`Full`][2] `SELECT`-выражения выполняются без извлечения строк, а остальные выражения выполняются
  /// для каждой строки связанных массивов (или один раз, если массивы не связаны).
  ///
  /// Возвращает количество строк, затронутых `INSERT/UPDATE/DELETE`, и `0` в остальных случаях. При ошибке
  /// выражение переходит в состояние [`Closed`][3].
  ///
  /// # OCI вызовы
  /// `OCIStmtExecute()`, затем `OCIAttrGet()` для получения количества строк.
  ///
  /// # Запросы к серверу (1)
  ///
  /// [1]: ../types/enum.ExecuteMode.html#variant.DescribeOnly
  /// [2]: ../types/enum.ExecuteMode.html#variant.Full
  /// [3]: enum.StatementState.html#variant.Closed
  pub fn execute(&mut self, mode: ExecuteMode) -> Result<u64> {
    let allowed = match self.state {
      StatementState::Unprepared | StatementState::Closed => false,
      _ => true,
    };
    self.require("execute", allowed)?;

    let (iters, native_mode) = match mode {
      ExecuteMode::DescribeOnly => (0, execute_mode::DESCRIBE_ONLY),
      ExecuteMode::Full => match self.statement_type()? {
        StatementType::SELECT => (0, execute_mode::DEFAULT),
        _ => (self.batch.unwrap_or(1), execute_mode::DEFAULT),
      },
    };
    if iters > 1 {
      // Каждое связывание должно нести значение для каждой итерации
      if let Some((_, b)) = self.binds.iter().find(|(_, b)| b.rows() != iters) {
        return Err(Error::BatchSize { expected: iters, actual: b.rows() });
      }
    }
    let res = unsafe {
      self.conn.api().stmt_execute(self.conn.handle(), self.native, self.error().native_mut(), iters, 0, native_mode)
    };
    if let Err(e) = self.error().check(res) {
      self.state = StatementState::Closed;
      return Err(e);
    }
    debug!("executed {:?} with {} iterations: {}", mode, iters, self.sql);
    self.state = StatementState::Executed(mode);

    if mode == ExecuteMode::Full && iters > 0 {
      return self.row_count();
    }
    Ok(0)
  }
  /// Задает количество строк, которые сервер передает заранее вместе с результатом выполнения и каждого
  /// извлечения. Последующие вызовы [`fetch`][1] берут строки из клиентского буфера, пока он не опустеет.
  /// `0` отключает предварительную выборку.
  ///
  /// # OCI вызовы
  /// `OCIAttrSet()` с атрибутом `OCI_ATTR_PREFETCH_ROWS`.
  ///
  /// # Запросы к серверу (0)
  ///
  /// [1]: #method.fetch
  pub fn set_prefetch_rows(&self, rows: u32) -> Result<()> {
    self.require("set_prefetch_rows", !self.native.is_null())?;
    self.set_(rows, Attr::PrefetchRows, self.error())
  }
  /// Текущее количество строк предварительной выборки
  pub fn prefetch_rows(&self) -> Result<u32> {
    self.require("prefetch_rows", !self.native.is_null())?;
    self.get_(Attr::PrefetchRows, self.error())
  }
  /// Получает количество строк, обработанных последним выполненным `INSERT/UPDATE/DELETE` запросом,
  /// или количество строк, извлеченных на текущий момент для `SELECT` запроса.
  pub fn row_count(&self) -> Result<u64> {
    self.require("row_count", self.state.is_executed())?;
    let count: u32 = self.get_(Attr::RowCount, self.error())?;
    Ok(count as u64)
  }
  /// Получает количество столбцов в списке выбора. Доступно только после выполнения выражения.
  pub fn descriptor_count(&self) -> Result<u32> {
    self.require("descriptor_count", self.state.is_executed())?;
    self.get_(Attr::ParamCount, self.error())
  }
  /// Получает описание столбца списка выбора. Нумерация с 1.
  fn column(&self, pos: usize) -> Result<Column> {
    let param = Param::get(self, pos as u32, self.error())?;
    Column::new(pos - 1, &param)
  }
  /// Получает информацию о списке выбора `SELECT`-выражения в порядке столбцов.
  pub fn columns(&self) -> Result<Vec<Column>> {
    let count = self.descriptor_count()? as usize;
    (1..=count).map(|pos| self.column(pos)).collect()
  }
  /// Создает буфер для извлечения столбца `pos` (нумерация с 1), подходящий по типу и размеру к описанию
  /// столбца. Доступно только после выполнения выражения, каждый столбец можно определить только один раз.
  ///
  /// # OCI вызовы
  /// `OCIParamGet()` и `OCIAttrGet()` для описания столбца, затем `OCIDefineByPos2()` (и `OCIDefineObject()`
  /// для объектных типов).
  pub fn define(&mut self, pos: usize) -> Result<&Define> {
    self.require("define", self.state.is_executed())?;
    if self.defines.contains_key(&pos) {
      return Err(Error::State { operation: "define", state: self.state });
    }
    let count = self.descriptor_count()? as usize;
    if pos == 0 || pos > count {
      return Err(Error::InvalidColumn);
    }
    let column = self.column(pos)?;
    let define = Define::new(self.conn, self.native, column)?;
    Ok(self.defines.entry(pos).or_insert(define))
  }
  /// Получает созданный ранее буфер столбца `pos` (нумерация с 1).
  #[inline]
  pub fn define_at(&self, pos: usize) -> Option<&Define> {
    self.defines.get(&pos)
  }
  /// Извлекает следующую строку в буферы столбцов. Возвращает `false`, когда строк больше нет. После этого
  /// все последующие вызовы возвращают `false` без обращения к нативной библиотеке.
  ///
  /// # OCI вызовы
  /// `OCIStmtFetch2()` на каждый вызов, пока есть строки.
  pub fn fetch(&mut self) -> Result<bool> {
    match self.state {
      StatementState::Exhausted => return Ok(false),
      StatementState::Executed(ExecuteMode::Full) |
      StatementState::Fetching => {},
      state => return Err(Error::State { operation: "fetch", state: state }),
    }
    let res = unsafe {
      self.conn.api().stmt_fetch(self.native, self.error().native_mut(), 1, fetch_orientation::NEXT, 0, execute_mode::DEFAULT)
    };
    if res == status::NO_DATA {
      self.state = StatementState::Exhausted;
      return Ok(false);
    }
    if let Err(e) = self.error().check(res) {
      self.state = StatementState::Closed;
      return Err(e);
    }
    self.state = StatementState::Fetching;
    Ok(true)
  }
  /// Получает `ROWID` последней строки, затронутой `INSERT/UPDATE/DELETE` выражением, в текстовом виде.
  pub fn last_rowid(&self) -> Result<String> {
    self.require("last_rowid", self.state.is_executed())?;
    let rowid: Descriptor<OCIRowid> = Descriptor::new(self.conn.env())?;
    let res = unsafe {
      self.conn.api().attr_get(
        self.native as *const c_void, HandleType::Stmt.code(),
        rowid.native_mut() as *mut c_void, ptr::null_mut(),
        Attr::RowId.into(), self.error().native_mut()
      )
    };
    self.error().check(res)?;
    rowid_to_string(&**self.conn.api(), rowid.native_mut(), self.error())
  }
}
impl<'c> Drop for Statement<'c> {
  fn drop(&mut self) {
    // Буферы связанных переменных и колонок освобождаются после хендла, которым они используются
    self.release();
  }
}
impl<'c> AttrHolder for Statement<'c> {
  fn holder_type(&self) -> c_uint {
    HandleType::Stmt.code()
  }
  fn native(&self) -> *const c_void {
    self.native as *const c_void
  }
  fn api(&self) -> &dyn Oci {
    &**self.conn.api()
  }
}
