use std::fmt;
use std::os::raw::{c_int, c_void};
use std::ptr;

use log::{trace, warn};

use crate::Result;
use crate::error::Error;
use crate::types::HandleType;

use super::{check_with, decode, Api, Env, NativeHandle, Oci, OCIError};
use super::attr::AttrHolder;
use super::types::status;

/// Хендл для сбора ошибок нативных вызовов. Каждый вызов, которому передается хендл ошибки, должен сразу же
/// проверяться через [`check`][1] именно этого хендла.
///
/// [1]: struct.Handle.html#method.check
pub type ErrorHandle = Handle<OCIError>;

/// Освобождает хендл указанного типа. Единственное место, где вызывается `OCIHandleFree()`.
pub fn free_handle(api: &dyn Oci, native: *mut c_void, ty: HandleType) -> Result<()> {
  trace!("free handle {:?} {:p}", ty, native);
  let res = unsafe { api.handle_free(native, ty.code()) };
  match res {
    status::SUCCESS => Ok(()),
    // Хендл ошибки для получения точной причины здесь может уже не существовать
    e => Err(Error::Db { handle: ty, source: decode(api, ptr::null_mut(), ty, e) }),
  }
}
//-------------------------------------------------------------------------------------------------
/// Автоматически освобождаемый хендл на ресурсы оракла
pub struct Handle<T: NativeHandle> {
  native: *mut T,
  api: Api,
}
impl<T: NativeHandle> Handle<T> {
  /// Создает новый хендл в указанном окружении. Ошибки выделения извлекаются из хендла окружения, т.к.
  /// хендла ошибки на этот момент может еще не быть.
  pub fn new(env: &Env) -> Result<Handle<T>> {
    let api = env.api();
    let mut handle = ptr::null_mut();
    let res = unsafe {
      api.handle_alloc(env.native() as *const c_void, &mut handle, T::ID.code())
    };
    check_with(&**api, env.native() as *mut c_void, HandleType::Env, res)?;
    trace!("alloc handle {:?} {:p}", T::ID, handle);
    Ok(Handle { native: handle as *mut T, api: api.clone() })
  }
  /// Получает голый указатель на хендл для передачи в нативные функции.
  #[inline]
  pub fn native_mut(&self) -> *mut T {
    self.native
  }
  /// Реализация нативного интерфейса, с помощью которой был создан хендл.
  #[inline]
  pub fn api(&self) -> &dyn Oci {
    &*self.api
  }
}
impl<T: NativeHandle> Drop for Handle<T> {
  fn drop(&mut self) {
    // Паниковать из деструктора нельзя, остается только сообщить о проблеме
    if let Err(e) = free_handle(&*self.api, self.native as *mut c_void, T::ID) {
      warn!("{}", e);
    }
  }
}
impl<T: NativeHandle> fmt::Debug for Handle<T> {
  fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
    fmt.debug_tuple("Handle")
       .field(&T::ID)
       .field(&self.native)
       .finish()
  }
}
impl<T: NativeHandle> AttrHolder for Handle<T> {
  fn holder_type(&self) -> u32 {
    T::ID.code()
  }
  fn native(&self) -> *const c_void {
    self.native as *const c_void
  }
  fn api(&self) -> &dyn Oci {
    &*self.api
  }
}

impl Handle<OCIError> {
  /// Проверяет результат, возвращенный функцией, которой был передан данный хендл. Успешные коды
  /// возвращаются как есть, для остальных из хендла извлекаются все диагностические записи.
  #[inline]
  pub fn check(&self, result: c_int) -> Result<c_int> {
    check_with(&*self.api, self.native as *mut c_void, HandleType::Error, result)
  }
}
