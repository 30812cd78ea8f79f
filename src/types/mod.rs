//! Перечисляемые типы данных и режимы, используемые при работе с библиотекой

use std::ops::BitOr;
use std::u32;

macro_rules! codes {
  (
    $(#[$meta:meta])*
    pub enum $name:ident : $repr:ty {
      $($(#[$vmeta:meta])* $variant:ident = $value:expr,)+
    }
  ) => (
    $(#[$meta])*
    #[repr($repr)]
    pub enum $name {
      $($(#[$vmeta])* $variant = $value,)+
    }
    impl $name {
      /// Преобразует нативный код в значение перечисления или возвращает `None`, если код
      /// не соответствует ни одному известному значению.
      pub fn from_code(code: $repr) -> Option<Self> {
        match code {
          $(x if x == $value => Some($name::$variant),)+
          _ => None,
        }
      }
      /// Нативный код данного значения.
      #[inline]
      pub fn code(self) -> $repr {
        self as $repr
      }
    }
  );
}

codes! {
/// Возможные типы данных базы данных (внешние типы OCI, `SQLT_*`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Type : u16 {
  /// (ORANET TYPE) character string
  CHR  = 1,
  /// (ORANET TYPE) oracle numeric
  NUM  = 2,
  /// (ORANET TYPE) integer
  INT  = 3,
  /// (ORANET TYPE) Floating point number
  FLT  = 4,
  /// zero terminated string
  STR  = 5,
  /// NUM with preceding length byte
  VNU  = 6,
  /// (ORANET TYPE) Packed Decimal Numeric
  PDN  = 7,
  /// long
  LNG  = 8,
  /// Variable character string
  VCS  = 9,
  /// Null/empty PCC Descriptor entry
  NON  = 10,
  /// rowid
  RID  = 11,
  /// date in oracle format
  DAT  = 12,
  /// binary in VCS format
  VBI  = 15,
  /// Native Binary float
  BFLOAT = 21,
  /// NAtive binary double
  BDOUBLE = 22,
  /// binary data(DTYBIN)
  BIN  = 23,
  /// long binary
  LBI  = 24,
  /// unsigned integer
  UIN  = 68,
  /// Display sign leading separate
  SLS  = 91,
  /// Longer longs (char)
  LVC  = 94,
  /// Longer long binary
  LVB  = 95,
  /// Ansi fixed char
  AFC  = 96,
  /// Ansi Var char
  AVC  = 97,
  /// binary float canonical
  IBFLOAT  = 100,
  /// binary double canonical
  IBDOUBLE = 101,
  /// cursor  type
  CUR  = 102,
  /// rowid descriptor
  RDD  = 104,
  /// label type
  LAB  = 105,
  /// oslabel type
  OSL  = 106,

  /// named object type
  NTY  = 108,
  /// ref type
  REF  = 110,
  /// character lob
  CLOB = 112,
  /// binary lob
  BLOB = 113,
  /// binary file lob
  BFILEE = 114,
  /// character file lob
  CFILEE = 115,
  /// result set type
  RSET = 116,
  /// named collection type (varray or nested table)
  NCO  = 122,
  /// OCIString type
  VST  = 155,
  /// OCIDate type
  ODT  = 156,

// datetimes and intervals
  /// ANSI Date
  DATE          = 184,
  /// TIME
  TIME          = 185,
  /// TIME WITH TIME ZONE
  TIME_TZ       = 186,
  /// TIMESTAMP
  TIMESTAMP     = 187,
  /// TIMESTAMP WITH TIME ZONE
  TIMESTAMP_TZ  = 188,
  /// INTERVAL YEAR TO MONTH
  INTERVAL_YM   = 189,
  /// INTERVAL DAY TO SECOND
  INTERVAL_DS   = 190,
  /// TIMESTAMP WITH LOCAL TIME ZONE
  TIMESTAMP_LTZ = 232,

  /// pl/sql representation of named types
  PNTY   = 241,

// some pl/sql specific types
  /// pl/sql 'record' (or %rowtype)
  REC    = 250,
  /// pl/sql 'indexed table'
  TAB    = 251,
  /// pl/sql 'boolean'
  BOL    = 252,
}
}

codes! {
/// Виды хендлов, которые можно выделять функцией `OCIHandleAlloc`. Также используется как
/// дискриминатор в функциях, принимающих хендл произвольного типа (`OCIAttrGet`, `OCIErrorGet`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleType : u32 {
  /// OCI environment handle (`OCIEnv`)
  Env = 1,
  /// OCI error handle (`OCIError`)
  Error = 2,
  /// OCI service context handle (`OCISvcCtx`)
  SvcCtx = 3,
  /// OCI statement handle (`OCIStmt`)
  Stmt = 4,
  /// OCI bind handle (`OCIBind`)
  Bind = 5,
  /// OCI define handle (`OCIDefine`)
  Define = 6,
  /// OCI describe handle (`OCIDescribe`)
  Describe = 7,
  /// OCI server handle (`OCIServer`)
  Server = 8,
  /// OCI user session handle (`OCISession`)
  Session = 9,
  /// OCI transaction handle (`OCITrans`)
  Trans = 10,
  /// OCI complex object retrieval (COR) handle (`OCIComplexObject`)
  ComplexObject = 11,
  /// OCI subscription handle (`OCISubscription`)
  Subscription = 13,
}
}

codes! {
/// Виды дескрипторов, которые можно создать функцией `OCIDescriptorAlloc`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DescriptorType : u32 {
  /// Specifies generation of a LOB value type locator (for a `BLOB` or `CLOB`) of C type `OCILobLocator`.
  Lob = 50,
  /// Specifies generation of snapshot descriptor of C type `OCISnapshot`
  Snapshot = 51,
  /// Read-only parameter descriptor of C type `OCIParam`. Такие дескрипторы принадлежат вызову,
  /// который их вернул, и никогда не освобождаются библиотекой.
  Param = 53,
  /// Specifies generation of a `ROWID` descriptor of C type `OCIRowid`.
  RowID = 54,
  /// Specifies generation of a complex object retrieval descriptor of C type `OCIComplexObjectComp`.
  ComplexObjectComp = 55,
  /// Specifies generation of a `FILE` value type locator of C type `OCILobLocator`.
  File = 56,
  /// Specifies generation of an `INTERVAL YEAR TO MONTH` descriptor of C type `OCIInterval`.
  IntervalYM = 62,
  /// Specifies generation of an `INTERVAL DAY TO SECOND` descriptor of C type `OCIInterval`.
  IntervalDS = 63,
  /// Specifies generation of an ANSI DATE descriptor of C type `OCIDateTime`.
  Date = 65,
  /// Specifies generation of a TIMESTAMP descriptor of C type `OCIDateTime`.
  Timestamp = 68,
  /// Specifies generation of a `TIMESTAMP WITH TIME ZONE` descriptor of C type `OCIDateTime`.
  TimestampWithTZ = 69,
  /// Specifies generation of a `TIMESTAMP WITH LOCAL TIME ZONE` descriptor of C type `OCIDateTime`.
  TimestampWithLTZ = 70,
}
}

codes! {
/// Тип объекта, описываемого дескриптором параметра (атрибут `OCI_ATTR_PTYPE`). Также передается
/// в `OCIDescribeAny` для указания ожидаемого типа описываемого объекта.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParameterType : u8 {
  /// Тип неизвестен, сервер определит его сам
  Unknown = 0,
  /// Таблица
  Table = 1,
  /// Представление
  View = 2,
  /// Процедура
  Procedure = 3,
  /// Функция
  Function = 4,
  /// Пакет
  Package = 5,
  /// Пользовательский тип
  Type = 6,
  /// Синоним
  Synonym = 7,
  /// Последовательность
  Sequence = 8,
  /// Столбец таблицы или представления
  Column = 9,
  /// Аргумент процедуры или функции
  Argument = 10,
  /// Список параметров
  List = 11,
  /// Атрибут пользовательского типа
  TypeAttribute = 12,
  /// Элемент коллекции
  Collection = 13,
  /// Метод пользовательского типа
  Method = 14,
  /// Аргумент метода пользовательского типа
  MethodArgument = 15,
  /// Результат метода пользовательского типа
  MethodResult = 16,
  /// Схема
  Schema = 17,
  /// База данных
  Database = 18,
}
}

codes! {
/// Форма набора символов столбца (атрибут `OCI_ATTR_CHARSET_FORM`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharsetForm : u8 {
  /// Форма не указана (не символьные данные)
  Unspecified = 0,
  /// Набор символов базы данных: `CHAR`, `VARCHAR2`, `CLOB` (`SQLCS_IMPLICIT`)
  Implicit = 1,
  /// Национальный набор символов: `NCHAR`, `NVARCHAR2`, `NCLOB` (`SQLCS_NCHAR`)
  NChar = 2,
  /// Явно указанный набор символов, `CHARACTER SET ...` (`SQLCS_EXPLICIT`)
  Explicit = 3,
  /// Гибкие параметры PL/SQL (`SQLCS_FLEXIBLE`)
  Flexible = 4,
  /// Литералы `NULL` и `empty_clob()` (`SQLCS_LIT_NULL`)
  LiteralNull = 5,
}
}
impl Default for CharsetForm {
  fn default() -> Self { CharsetForm::Unspecified }
}

codes! {
/// Тип выражения, определенный сервером при подготовке (атрибут `OCI_ATTR_STMT_TYPE`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum StatementType : u16 {
  /// Тип выражения не определен
  UNKNOWN = 0,
  /// `SELECT`-выражение
  SELECT  = 1,
  /// `UPDATE`-выражение
  UPDATE  = 2,
  /// `DELETE`-выражение
  DELETE  = 3,
  /// `INSERT`-выражение
  INSERT  = 4,
  /// `CREATE`-выражение
  CREATE  = 5,
  /// `DROP`-выражение
  DROP    = 6,
  /// `ALTER`-выражение
  ALTER   = 7,
  /// Анонимный PL/SQL блок `BEGIN ... END`
  BEGIN   = 8,
  /// Анонимный PL/SQL блок `DECLARE ... BEGIN ... END`
  DECLARE = 9,
  /// `CALL`-выражение
  CALL    = 10,
  /// `MERGE`-выражение
  MERGE   = 16,
}
}

/// Режим, в котором создавать окружение при вызове `OCIEnvNlsCreate()`. Режимы можно комбинировать
/// оператором `|`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CreateMode(u32);
impl CreateMode {
  /// The default value, which is non-UTF-16 encoding.
  pub const DEFAULT: CreateMode = CreateMode(0);
  /// Uses threaded environment. Internal data structures not exposed to the user are protected from concurrent
  /// accesses by multiple threads.
  pub const THREADED: CreateMode = CreateMode(1 << 0);
  /// Uses object features.
  pub const OBJECT: CreateMode = CreateMode(1 << 1);
  /// Uses publish-subscribe notifications.
  pub const EVENTS: CreateMode = CreateMode(1 << 2);
  /// Suppresses the calling of the dynamic callback routine OCIEnvCallback(). The default behavior is to allow
  /// calling of OCIEnvCallback() when the environment is created.
  pub const NO_UCB: CreateMode = CreateMode(1 << 6);
  /// No mutual exclusion (mutex) locking occurs in this mode. All OCI calls done on the environment handle,
  /// or on handles derived from the environment handle, must be serialized. `OCI_THREADED` must also be specified
  /// when `OCI_ENV_NO_MUTEX` is specified.
  pub const ENV_NO_MUTEX: CreateMode = CreateMode(1 << 7);

  /// Битовое представление режима, передаваемое в `OCIEnvNlsCreate()`.
  #[inline]
  pub fn bits(self) -> u32 { self.0 }
  /// Проверяет, что все флаги `other` включены в данный режим.
  #[inline]
  pub fn contains(self, other: CreateMode) -> bool { self.0 & other.0 == other.0 }
}
impl BitOr for CreateMode {
  type Output = CreateMode;
  fn bitor(self, rhs: CreateMode) -> CreateMode { CreateMode(self.0 | rhs.0) }
}
impl Default for CreateMode {
  /// Многопоточное окружение с поддержкой объектов.
  fn default() -> Self { CreateMode::THREADED | CreateMode::OBJECT }
}

/// Набор символов клиента для окружения, передаваемый в `OCIEnvNlsCreate()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Charset {
  /// Использовать настройку `NLS_LANG` (или `NLS_NCHAR` для национального набора)
  Default,
  /// `AL32UTF8`
  AL32UTF8,
  /// `UTF16`
  UTF16,
  /// Произвольный идентификатор набора символов Oracle
  Id(u16),
}
impl Charset {
  /// Идентификатор набора символов Oracle. `0` означает использование настроек окружения.
  pub fn id(self) -> u16 {
    match self {
      Charset::Default => 0,
      Charset::AL32UTF8 => 873,
      Charset::UTF16 => 1000,
      Charset::Id(id) => id,
    }
  }
}
impl Default for Charset {
  fn default() -> Self { Charset::AL32UTF8 }
}

/// Режим, в котором подключаться к cерверу базы данных при вызове `OCIServerAttach()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachMode {
  /// For encoding, this value tells the server handle to use the setting in the environment handle.
  Default = 0,
  /// Use connection pooling.
  CPool   = 1 << 9,
}
impl Default for AttachMode {
  fn default() -> Self { AttachMode::Default }
}
/// Specifies the various modes of operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
  /// In this mode, the user session context returned can only ever be set with the server context
  /// specified in `svchp`. For encoding, the server handle uses the setting in the environment handle.
  Default = 0,
  /// In this mode, the new user session context can be set in a service handle with a different server handle.
  Migrate     = 1 << 0,
  /// In this mode, you are authenticated for `SYSDBA` access
  SysDba      = 1 << 1,
  /// In this mode, you are authenticated for `SYSOPER` access
  SysOper     = 1 << 2,
  /// This mode can only be used with `SysDba` or `SysOper` to authenticate for certain administration tasks
  PrelimAuth  = 1 << 3,
  /// Enables statement caching with default size on the given service handle.
  StmtCache   = 1 << 6,
}
impl Default for AuthMode {
  fn default() -> Self { AuthMode::Default }
}
/// Диалект Oracle-а, используемый для разбора SQL-кода запросов. Рекомендуется всегда использовать нативный для сервера
/// диалект, он является диалектом по умолчанию при выполнении [`prepare`][1] без параметров.
///
/// [1]: ../struct.ServiceContext.html#method.prepare
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Syntax {
  /// Синтаксис зависит от версии сервера базы данных.
  Native = 1,
  /// V7 ORACLE parsing syntax.
  V7 = 2,
  /// Specifies the statement to be translated according to the SQL translation profile set in the session.
  Foreign = u32::MAX as isize,
}
impl Default for Syntax {
  fn default() -> Self { Syntax::Native }
}

/// Способ выполнения выражения.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExecuteMode {
  /// Выражение не выполняется, сервер только возвращает описание списка выбора. Строк при этом
  /// не извлекается.
  DescribeOnly,
  /// Полноценное выполнение выражения. Для `SELECT`-выражений после него доступно извлечение строк.
  Full,
}
impl Default for ExecuteMode {
  fn default() -> Self { ExecuteMode::Full }
}
