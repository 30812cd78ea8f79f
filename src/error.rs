//! Виды ошибок, которые могут генерироваться библиотекой.

use std::fmt;

use thiserror::Error;

use crate::stmt::StatementState;
use crate::types::{DescriptorType, HandleType, ParameterType, Type};

/// Информация об одной ошибке/предупреждении Oracle
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Info {
  /// Код ошибки оракла, `ORA-xxxxx`.
  pub code: isize,
  /// Сообщение оракла об ошибке, полученной функцией `OCIErrorGet()`.
  pub message: String,
}
impl fmt::Display for Info {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    // Оракл обычно сам начинает сообщение с кода, но не всегда
    if self.message.starts_with("ORA-") {
      f.write_str(self.message.trim_end())
    } else {
      write!(f, "ORA-{:05}: {}", self.code, self.message.trim_end())
    }
  }
}

/// Ошибки, возникающие при вызове нативных функций Oracle.
#[derive(Debug, Error)]
pub enum DbError {
  /// Функция выполнилась успешно, но есть диагностическая информация
  /// (функция вернула код `OCI_SUCCESS_WITH_INFO (==1)`).
  #[error("success with info: {}", join(.0))]
  Info(Vec<Info>),
  /// Функция при своем выполнении исчерпала все данные, предоставленные ей и ей требуется еще
  /// (функция вернула код `OCI_NEED_DATA (==99)`).
  #[error("need additional data for continue execution")]
  NeedData,
  /// Вызов функции получения данных не вернул никаких данных
  /// (функция вернула код `OCI_NO_DATA (==100)`).
  #[error("no data")]
  NoData,

  /// Ошибка вызова одной из функций API Oracle (функция вернула код `OCI_ERROR (==-1)`).
  /// Содержит все записи диагностики, полученные вызовами функции `OCIErrorGet()`, в порядке
  /// их номеров. Список никогда не бывает пустым.
  #[error("{}", join(.0))]
  Fault(Vec<Info>),
  /// Хендл, переданный в функцию, оказался некорректным
  /// (функция вернула код `OCI_INVALID_HANDLE (==-2)`).
  #[error("invalid handle passed to function (status -2)")]
  InvalidHandle,
  /// Возвращается из некоторых функций, в неблокирующем режиме, означает, что асинхронная операция
  /// начата, но еще не завершена (функция вернула код `OCI_STILL_EXECUTING (==-3123)`).
  #[error("asynchronous call of function not yet completed, still executing")]
  StillExecuting,
  /// Функция вернула неизвестный код ошибки, не покрытый ни одним из предыдущих вариантов
  #[error("unknown return code {0}")]
  Unknown(isize),
}
impl DbError {
  /// Код первой ошибки оракла (`ORA-xxxxx`), если он известен.
  pub fn code(&self) -> Option<isize> {
    match *self {
      DbError::Fault(ref infos) |
      DbError::Info(ref infos) => infos.first().map(|i| i.code),
      _ => None,
    }
  }
}

fn join(infos: &[Info]) -> String {
  infos.iter().map(Info::to_string).collect::<Vec<_>>().join("; ")
}

/// Ошибка, которую может вернуть библиотека. Включает ошибки взаимодействия с базой данных,
/// нарушения порядка работы с выражением и ошибки конвертации значений
#[derive(Debug, Error)]
pub enum Error {
  /// Не удалось создать окружение или подключиться к серверу, либо окружение не было инициализировано.
  #[error("initialization failed: {0}")]
  Init(#[source] DbError),
  /// Ошибка вызова одной из функций API Oracle.
  #[error("{source} (handle {handle:?})")]
  Db {
    /// Тип хендла, из которого была извлечена диагностика
    handle: HandleType,
    /// Ошибка, возвращенная нативной функцией
    #[source]
    source: DbError,
  },
  /// Операция вызвана в состоянии выражения, в котором она запрещена (например, `define` до `execute`).
  #[error("operation `{operation}` is not allowed in statement state {state:?}")]
  State {
    /// Название вызванной операции
    operation: &'static str,
    /// Состояние, в котором находилось выражение
    state: StatementState,
  },
  /// Ошибка преобразования значения Rust в значение базы данных или наоборот
  #[error("can't convert value from/to Rust to DB type {0:?}")]
  Conversion(Type),
  /// Попытка освободить дескриптор, которым владеет породивший его вызов (`PARAM`), либо
  /// повторное освобождение дескриптора.
  #[error("descriptor of type {0:?} must not be freed here")]
  DescriptorLifecycle(DescriptorType),
  /// Возникает при получении элемента из строки выборки, если индекс, по которому получается элемент,
  /// не существует в выборке.
  #[error("nonexisting column")]
  InvalidColumn,
  /// Выходное значение запрошено для переменной, которая не связана с выражением или связана не одиночным
  /// значением.
  #[error("nonexisting scalar bind")]
  InvalidBind,
  /// Массивы, связанные с одним выражением, содержат разное количество строк.
  #[error("array bind holds {actual} rows, but {expected} rows were bound before")]
  BatchSize {
    /// Количество строк в ранее связанных массивах
    expected: u32,
    /// Количество строк в связываемом массиве
    actual: u32,
  },
  /// Описанный объект базы данных имеет не тот вид, который требуется операции, например, синоним вместо таблицы.
  #[error("object `{name}` has unexpected type {ptype:?}")]
  WrongObjectType {
    /// Имя описанного объекта
    name: String,
    /// Вид объекта из описания, если он известен библиотеке
    ptype: Option<ParameterType>,
  },
}
impl Error {
  /// Код ошибки оракла (`ORA-xxxxx`), если ошибка пришла из нативного вызова.
  pub fn code(&self) -> Option<isize> {
    match *self {
      Error::Init(ref e) => e.code(),
      Error::Db { ref source, .. } => source.code(),
      _ => None,
    }
  }
}
