//! Числовые константы нативного интерфейса: коды возврата функций, атрибуты хендлов и дескрипторов,
//! режимы вызова функций.

use std::os::raw::c_int;

/// Коды возврата нативных функций.
pub mod status {
  use super::c_int;

  /// The function completed successfully.
  pub const SUCCESS: c_int = 0;
  /// The function completed successfully; a call to `OCIErrorGet()` returns additional diagnostic information.
  pub const SUCCESS_WITH_INFO: c_int = 1;
  /// The application must provide runtime data.
  pub const NEED_DATA: c_int = 99;
  /// The function completed, and there is no further data.
  pub const NO_DATA: c_int = 100;
  /// The function failed; a call to `OCIErrorGet()` returns additional information.
  pub const ERROR: c_int = -1;
  /// An invalid handle was passed as a parameter or a user callback was passed an invalid handle or invalid context.
  pub const INVALID_HANDLE: c_int = -2;
  /// The service context was established in nonblocking mode, and the current operation could not be completed immediately.
  pub const STILL_EXECUTING: c_int = -3123;
}

/// Specifies the type of credentials to use for establishing the user session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialMode {
  /// Authenticate using a database user name and password pair as credentials.
  /// The attributes `OCI_ATTR_USERNAME` and `OCI_ATTR_PASSWORD` should be set on the user session context before this call.
  Rdbms = 1 << 0,
  /// Authenticate using external credentials. No user name or password is provided.
  Ext   = 1 << 2,
}

/// Атрибуты хендлов (окружения, сервера, сессии, выражения и т.п.).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attr {
  /// Хендл сервера, ассоциированный с контекстом сервиса.
  ///
  /// `OCIServer **/OCIServer *`
  Server = 6,
  /// Хендл сессии, ассоциированный с контекстом сервиса.
  ///
  /// `OCISession **/OCISession *`
  Session = 7,
  /// Количество строк, обработанных выражением, либо извлеченных из курсора на текущий момент.
  ///
  /// `ub4 */`
  RowCount = 9,
  /// Количество строк, которые сервер передает клиенту заранее при выполнении и каждом извлечении.
  ///
  /// `ub4 */ub4 *`
  PrefetchRows = 11,
  /// Количество столбцов в списке выбора выражения.
  ///
  /// `ub4 */`
  ParamCount = 18,
  /// `ROWID` последней строки, затронутой `INSERT/UPDATE/DELETE` выражением.
  ///
  /// `OCIRowid */`
  RowId = 19,
  /// Имя пользователя для аутентификации.
  ///
  /// `oratext **/oratext *`
  Username = 22,
  /// Пароль пользователя для аутентификации.
  ///
  /// `oratext **/oratext *`
  Password = 23,
  /// Тип выражения.
  ///
  /// `ub2 */`
  StmtType = 24,
  /// Корневой дескриптор параметра, полученный в результате `OCIDescribeAny()`.
  ///
  /// `OCIParam **/`
  Param = 124,
  /// Количество строк, извлеченных последним вызовом `OCIStmtFetch2()`.
  ///
  /// `ub4 */`
  RowsFetched = 197,
}

/// Атрибуты дескрипторов параметров (`OCI_DTYPE_PARAM`), описывающих столбцы, таблицы, схемы и т.п.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamAttr {
  /// Максимальный размер данных столбца в байтах.
  ///
  /// `ub2 */`
  DataSize = 1,
  /// Внешний тип данных (`SQLT_*`).
  ///
  /// `ub2 */`
  DataType = 2,
  /// Имя объекта.
  ///
  /// `oratext **/`
  Name = 4,
  /// Точность числа.
  ///
  /// `ub1 */` для столбцов таблиц, `sb2 */` для списка выбора
  Precision = 5,
  /// Масштаб числа.
  ///
  /// `sb1 */`
  Scale = 6,
  /// Допускает ли столбец `NULL`-значения.
  ///
  /// `ub1 */`
  IsNull = 7,
  /// Имя пользовательского типа для столбцов объектных типов.
  ///
  /// `oratext **/`
  TypeName = 8,
  /// Схема пользовательского типа для столбцов объектных типов.
  ///
  /// `oratext **/`
  SchemaName = 9,
  /// Позиция столбца или аргумента (нумерация с 1).
  ///
  /// `ub2 */`
  Position = 11,
  /// Идентификатор набора символов столбца.
  ///
  /// `ub2 */`
  CharsetId = 31,
  /// Форма набора символов столбца.
  ///
  /// `ub1 */`
  CharsetForm = 32,
  /// Количество столбцов таблицы или представления.
  ///
  /// `ub2 */`
  NumCols = 102,
  /// Список столбцов таблицы или представления.
  ///
  /// `OCIParam **/`
  ListColumns = 103,
  /// Количество элементов в списке параметров.
  ///
  /// `ub2 */`
  NumParams = 121,
  /// Тип описываемого объекта.
  ///
  /// `ub1 */`
  Ptype = 123,
  /// Имя объекта, на который указывает синоним или элемент списка схемы.
  ///
  /// `oratext **/`
  ObjName = 134,
  /// Схема объекта.
  ///
  /// `oratext **/`
  ObjSchema = 135,
  /// Идентификатор объекта.
  ///
  /// `ub4 */`
  ObjId = 136,
  /// Список объектов схемы.
  ///
  /// `OCIParam **/`
  ListObjects = 261,
  /// Список схем базы данных.
  ///
  /// `OCIParam **/`
  ListSchemas = 263,
  /// Используется ли для столбца символьная семантика длины.
  ///
  /// `ub1 */`
  CharUsed = 285,
  /// Длина столбца в символах.
  ///
  /// `ub2 */`
  CharSize = 286,
  /// Является ли столбец невидимым.
  ///
  /// `ub1 */`
  InvisibleCol = 461,
}

/// Коды режимов вызова `OCIStmtExecute()`.
pub mod execute_mode {
  /// Calling `OCIStmtExecute()` in this mode executes the statement. It also implicitly returns describe information about the select list.
  pub const DEFAULT: u32 = 0;
  /// This mode is for users who want to describe a query before execution. Calling `OCIStmtExecute()` in this mode does not
  /// execute the statement, but it does return the select-list description.
  pub const DESCRIBE_ONLY: u32 = 1 << 4;
  /// When a statement is executed in this mode, the current transaction is committed after execution, if execution completes successfully.
  pub const COMMIT_ON_SUCCESS: u32 = 1 << 5;
}

/// Ориентация извлечения `OCIStmtFetch2()`.
pub mod fetch_orientation {
  /// Gets the next row from the current position.
  pub const NEXT: u16 = 1 << 1;
}

/// Тип имени, передаваемого в `OCIDescribeAny()` (`OCI_OTYPE_NAME`).
pub const OTYPE_NAME: u8 = 1;
/// Продолжительность закрепления объектов в кеше (`OCI_DURATION_SESSION`).
pub const DURATION_SESSION: u16 = 10;
/// Режим получения описания типа (`OCI_TYPEGET_HEADER`).
pub const TYPEGET_HEADER: u32 = 0;

/// Индикатор `NULL`-значения, передаваемый при связывании и получаемый при извлечении данных.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i16)]
pub enum OCIInd {
  /// Значение не `NULL`
  NotNull = 0,
  /// Значение `NULL`
  Null = -1,
}
impl Default for OCIInd {
  fn default() -> Self { OCIInd::NotNull }
}
