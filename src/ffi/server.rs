use std::os::raw::{c_int, c_uchar, c_uint, c_void};
use std::ptr;

use log::debug;

use crate::Result;
use crate::types::AttachMode;
use crate::version::Version;

use super::{Env, ErrorHandle, Handle, OCIServer};
//-------------------------------------------------------------------------------------------------
/// Хранит хендл `OCIServer`, предоставляющий доступ к базе данных. Отключение от сервера выполняет
/// владелец через [`detach`][1], т.к. для него нужен хендл ошибок, которым сервер не владеет.
///
/// [1]: #method.detach
#[derive(Debug)]
pub struct Server {
  handle: Handle<OCIServer>,
  /// Режим создания соединений, установленный при установлении соединения к серверу.
  mode: AttachMode,
  attached: bool,
}
impl Server {
  /// Осуществляет подключение к указанному серверу в рамках данного окружения
  pub fn attach(env: &Env, err: &ErrorHandle, dblink: Option<&str>, mode: AttachMode) -> Result<Self> {
    let server: Handle<OCIServer> = Handle::new(env)?;
    let (ptr, len) = match dblink {
      Some(db) => (db.as_ptr(), db.len()),
      None => (ptr::null(), 0)
    };
    let res = unsafe {
      env.api().server_attach(
        server.native_mut(), err.native_mut(),
        ptr, len as c_int,
        mode as c_uint
      )
    };
    err.check(res)?;
    debug!("attached to server {:?}", dblink);
    Ok(Server { handle: server, mode: mode, attached: true })
  }
  /// Хендл сервера
  #[inline]
  pub fn handle(&self) -> &Handle<OCIServer> {
    &self.handle
  }
  /// Отключается от сервера. Повторные вызовы ничего не делают.
  pub fn detach(&mut self, err: &ErrorHandle) -> Result<()> {
    if !self.attached {
      return Ok(());
    }
    self.attached = false;
    let res = unsafe {
      self.handle.api().server_detach(self.handle.native_mut(), err.native_mut(), self.mode as c_uint)
    };
    err.check(res).map(|_| ())
  }
  /// Возвращает версию сервера Oracle-а, к которому подключен клиент, и его баннер.
  ///
  /// # Запросы к серверу (1)
  /// Функция выполняет один запрос к серверу при каждом вызове.
  pub fn version(&self, err: &ErrorHandle) -> Result<(Version, String)> {
    let mut version: c_uint = 0;
    let mut buf = vec![0u8; 1024];
    let res = unsafe {
      self.handle.api().server_release(
        self.handle.native_mut() as *mut c_void, err.native_mut(),
        buf.as_mut_ptr() as *mut c_uchar, buf.len() as c_uint,
        crate::types::HandleType::Server.code() as c_uchar,
        &mut version
      )
    };
    err.check(res)?;
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    buf.truncate(len);
    Ok((Version::from_release(version), String::from_utf8_lossy(&buf).into_owned()))
  }
}
