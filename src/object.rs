//! Описания пользовательских типов (`CREATE TYPE ... AS OBJECT`, коллекции), необходимые для связывания
//! и извлечения экземпляров объектов.

use std::fmt;
use std::ptr;

use log::debug;

use crate::{Result, ServiceContext};
use crate::ffi::OCIType;
use crate::ffi::types::{DURATION_SESSION, TYPEGET_HEADER};

/// Описание пользовательского типа (TDO), закрепленное в кеше объектов на время сессии. Сам объект
/// описания принадлежит кешу, поэтому при разрушении ничего не освобождается.
pub struct ObjectType<'c> {
  conn: &'c ServiceContext<'c>,
  tdo: *mut OCIType,
  schema: String,
  name: String,
}
impl<'c> ObjectType<'c> {
  /// Получает описание типа вызовом `OCITypeByName()`. Если схема пустая, тип ищется в схеме
  /// текущего пользователя.
  pub fn by_name(conn: &'c ServiceContext<'c>, schema: &str, name: &str) -> Result<Self> {
    let mut tdo = ptr::null_mut();
    let (s_ptr, s_len) = if schema.is_empty() { (ptr::null(), 0) } else { (schema.as_ptr(), schema.len()) };
    let res = unsafe {
      conn.api().type_by_name(
        conn.env().native(), conn.error().native_mut(), conn.handle(),
        s_ptr, s_len as u32,
        name.as_ptr(), name.len() as u32,
        DURATION_SESSION, TYPEGET_HEADER,
        &mut tdo
      )
    };
    conn.error().check(res)?;
    debug!("type {}.{} pinned at {:p}", schema, name, tdo);
    Ok(ObjectType { conn: conn, tdo: tdo, schema: schema.to_owned(), name: name.to_owned() })
  }
  /// Схема, в которой объявлен тип.
  #[inline]
  pub fn schema(&self) -> &str {
    &self.schema
  }
  /// Имя типа.
  #[inline]
  pub fn name(&self) -> &str {
    &self.name
  }
  /// Соединение, в кеше объектов которого находится описание.
  #[inline]
  pub fn service_context(&self) -> &'c ServiceContext<'c> {
    self.conn
  }
  /// Указатель на описание типа для передачи в `OCIBindObject()`/`OCIDefineObject()`.
  #[inline]
  pub fn native(&self) -> *mut OCIType {
    self.tdo
  }
}
impl<'c> fmt::Debug for ObjectType<'c> {
  fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
    fmt.debug_struct("ObjectType")
       .field("schema", &self.schema)
       .field("name", &self.name)
       .field("tdo", &self.tdo)
       .finish()
  }
}
