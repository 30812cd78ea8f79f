use std::fmt;
use std::os::raw::c_void;
use std::ptr;

use log::{debug, warn};

use crate::Result;
use crate::error::Error;
use crate::params::InitParams;
use crate::types::{CreateMode, HandleType};

use super::{decode, free_handle, Api, OCIEnv};
use super::types::status;
//-------------------------------------------------------------------------------------------------
/// Автоматически закрываемый хендл окружения оракла. Владеет ссылкой на реализацию нативного интерфейса,
/// которую получают все порожденные им хендлы и дескрипторы.
pub struct Env {
  native: *mut OCIEnv,
  mode: CreateMode,
  api: Api,
}
impl Env {
  /// Создает окружение вызовом `OCIEnvNlsCreate()` в режиме и с наборами символов из `params`.
  pub fn new(api: Api, params: &InitParams) -> Result<Self> {
    let mut handle = ptr::null_mut();
    let res = unsafe {
      api.env_create(&mut handle, params.mode.bits(), params.charset.id(), params.ncharset.id())
    };
    match res {
      status::SUCCESS |
      status::SUCCESS_WITH_INFO => {
        debug!("environment created in mode {:?}", params.mode);
        Ok(Env { native: handle, mode: params.mode, api: api })
      },
      // Если хендл все же создан, диагностику можно получить из него, после чего его нужно освободить
      e => {
        let err = decode(&*api, handle as *mut c_void, HandleType::Env, e);
        if !handle.is_null() {
          if let Err(e) = free_handle(&*api, handle as *mut c_void, HandleType::Env) {
            warn!("{}", e);
          }
        }
        Err(Error::Init(err))
      },
    }
  }
  /// Получает голый указатель на хендл окружения, используемый для передачи в нативные функции.
  #[inline]
  pub fn native(&self) -> *mut OCIEnv {
    self.native
  }
  /// Режим, в котором было создано окружение.
  #[inline]
  pub fn mode(&self) -> CreateMode {
    self.mode
  }
  /// Реализация нативного интерфейса, с которой работает окружение.
  #[inline]
  pub fn api(&self) -> &Api {
    &self.api
  }
}
impl Drop for Env {
  fn drop(&mut self) {
    if let Err(e) = free_handle(&*self.api, self.native as *mut c_void, HandleType::Env) {
      warn!("{}", e);
    }
  }
}
impl fmt::Debug for Env {
  fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
    fmt.debug_tuple("Env")
       .field(&self.native)
       .field(&self.mode)
       .finish()
  }
}
// Хендл окружения не изменяется после создания, а все порожденные им ресурсы привязаны к одному потоку
unsafe impl Send for Env {}
unsafe impl Sync for Env {}
