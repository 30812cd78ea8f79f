//! Безопасные обертки над нативным интерфейсом OCI: типы-маркеры нативных хендлов, RAII-хендлы и
//! дескрипторы, извлечение диагностики из хендлов ошибок.

use std::os::raw::{c_int, c_uint, c_void};
use std::sync::Arc;

use log::warn;

use crate::Result;
use crate::error::{DbError, Error, Info};
use crate::types::{DescriptorType, HandleType};

mod api;
mod attr;
mod descriptor;
mod env;
mod handle;
mod server;
pub mod types;
#[cfg(feature = "native")]
pub mod native;

pub use self::api::Oci;
pub use self::attr::AttrHolder;
pub use self::descriptor::{free_descriptor, ArrayDescriptor, Descriptor, GenericDescriptor, Param};
pub use self::env::Env;
pub use self::handle::{free_handle, ErrorHandle, Handle};
pub use self::server::Server;

use self::types::status;

/// Разделяемая ссылка на реализацию нативного интерфейса.
pub type Api = Arc<dyn Oci>;

/// Тип, реализующий данный типаж, может быть передан в функцию `OCIHandleAlloc` для создания хендла.
/// Ассоциированная константа `ID` указывает тип хендла, который будет передан в функцию.
pub trait NativeHandle {
  /// Вид хендла, используемый типом, реализующим данный типаж.
  const ID: HandleType;
}
/// Тип, реализующий данный типаж, может быть передан в функцию `OCIDescriptorAlloc` для создания дескриптора.
/// Ассоциированная константа `ID` указывает тип дескриптора, который будет передан в функцию.
pub trait NativeDescriptor {
  /// Вид дескриптора, используемый типом, реализующим данный типаж.
  const ID: DescriptorType;
}

macro_rules! handle {
  ($($name:ident => $kind:ident),+ $(,)*) => (
    $(
      #[doc = concat!("Непрозрачный нативный тип `", stringify!($name), "`.")]
      #[derive(Debug)]
      pub enum $name {}
      impl NativeHandle for $name { const ID: HandleType = HandleType::$kind; }
    )+
  );
}
macro_rules! descriptor {
  ($($name:ident => $kind:ident),+ $(,)*) => (
    $(
      #[doc = concat!("Непрозрачный нативный тип `", stringify!($name), "`.")]
      #[derive(Debug)]
      pub enum $name {}
      impl NativeDescriptor for $name { const ID: DescriptorType = DescriptorType::$kind; }
    )+
  );
}

handle!(
  OCIEnv      => Env,
  OCIError    => Error,
  OCISvcCtx   => SvcCtx,
  OCIStmt     => Stmt,
  OCIBind     => Bind,
  OCIDefine   => Define,
  OCIDescribe => Describe,
  OCIServer   => Server,
  OCISession  => Session,
);
descriptor!(
  OCIParam      => Param,
  OCIRowid      => RowID,
  OCILobLocator => Lob,
);
/// Описание пользовательского типа (Type Descriptor Object), полученное из кеша объектов.
#[derive(Debug)]
pub enum OCIType {}

//-------------------------------------------------------------------------------------------------
/// Извлекает из хендла все диагностические записи, начиная с первой, пока нативная функция не сообщит
/// об их отсутствии. Записи возвращаются в порядке их номеров.
///
/// # Параметры
/// - handle:
///   Хендл, из которого можно извлечь информацию об ошибке. Обычно это хендл `OCIError`, но
///   в тех случаях, когда его нет (создание хендлов и дескрипторов), используется хендл окружения `OCIEnv`
/// - ty:
///   Тип хендла `handle`
pub fn diagnostics(api: &dyn Oci, handle: *mut c_void, ty: HandleType) -> Vec<Info> {
  let mut infos = Vec::new();
  if handle.is_null() {
    return infos;
  }
  for recordno in 1.. {
    let mut code: c_int = 0;
    // Оракл рекомендует использовать буфер величиной 3072 байта
    let mut buf = vec![0u8; 3072];
    let res = unsafe {
      api.error_get(handle, recordno, &mut code, buf.as_mut_ptr(), buf.len() as c_uint, ty.code())
    };
    if res != status::SUCCESS {
      break;
    }
    // Функция только заполняет буфер, но не возвращает длину сообщения
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    buf.truncate(len);
    infos.push(Info { code: code as isize, message: String::from_utf8_lossy(&buf).into_owned() });
  }
  infos
}
/// Транслирует код возврата нативной функции, отличный от `OCI_SUCCESS`, в ошибку базы данных, забирая
/// из хендла диагностические записи, если они там есть.
pub fn decode(api: &dyn Oci, handle: *mut c_void, ty: HandleType, rc: c_int) -> DbError {
  match rc {
    status::SUCCESS_WITH_INFO => DbError::Info(diagnostics(api, handle, ty)),
    status::NEED_DATA => DbError::NeedData,
    status::NO_DATA => DbError::NoData,
    status::ERROR => {
      let mut infos = diagnostics(api, handle, ty);
      if infos.is_empty() {
        infos.push(Info { code: 0, message: format!("call failed with status {} and no diagnostics", rc) });
      }
      DbError::Fault(infos)
    },
    status::INVALID_HANDLE => DbError::InvalidHandle,
    status::STILL_EXECUTING => DbError::StillExecuting,
    e => DbError::Unknown(e as isize),
  }
}
/// Проверяет код возврата нативной функции. Успешный код возвращается без изменений. Для кода
/// `OCI_SUCCESS_WITH_INFO` диагностика пишется в лог и код также считается успешным. Любой другой код
/// превращается в ошибку [`Error::Db`], содержащую все диагностические записи хендла.
///
/// Функция должна вызываться сразу после нативного вызова, которому был передан `handle`, иначе следующий
/// вызов затрет диагностику.
///
/// [`Error::Db`]: ../error/enum.Error.html#variant.Db
pub fn check_with(api: &dyn Oci, handle: *mut c_void, ty: HandleType, rc: c_int) -> Result<c_int> {
  match rc {
    status::SUCCESS => Ok(rc),
    status::SUCCESS_WITH_INFO => {
      for info in diagnostics(api, handle, ty) {
        warn!("{}", info);
      }
      Ok(rc)
    },
    e => Err(Error::Db { handle: ty, source: decode(api, handle, ty, e) }),
  }
}
