//! Обобщенное получение и установка атрибутов хендлов и дескрипторов через `OCIAttrGet()`/`OCIAttrSet()`.

use std::os::raw::{c_uint, c_void};
use std::ptr;
use std::slice;

use num_traits::PrimInt;

use crate::Result;
use crate::error::Error;
use crate::types::Type;

use super::{ErrorHandle, Handle, NativeHandle, Oci, Param};
use super::types::{Attr, ParamAttr};

impl From<Attr> for c_uint {
  fn from(attr: Attr) -> c_uint { attr as c_uint }
}
impl From<ParamAttr> for c_uint {
  fn from(attr: ParamAttr) -> c_uint { attr as c_uint }
}

/// Объект, у которого можно получать и устанавливать атрибуты. Реализуется хендлами, дескрипторами и
/// представлениями параметров.
pub trait AttrHolder {
  /// Тип хендла или дескриптора, второй аргумент `OCIAttrGet()`/`OCIAttrSet()` (`trghndltyp`).
  fn holder_type(&self) -> c_uint;
  /// Указатель на хендл или дескриптор, первый аргумент `OCIAttrGet()`/`OCIAttrSet()`.
  fn native(&self) -> *const c_void;
  /// Реализация нативного интерфейса, через которую работать с атрибутами.
  fn api(&self) -> &dyn Oci;

  /// Получает значение целочисленного атрибута.
  fn get_<T: PrimInt, A: Into<c_uint>>(&self, attr: A, err: &ErrorHandle) -> Result<T> {
    let mut result = T::zero();
    let res = unsafe {
      self.api().attr_get(
        self.native(), self.holder_type(),
        &mut result as *mut T as *mut c_void, ptr::null_mut(),
        attr.into(), err.native_mut()
      )
    };
    err.check(res)?;
    Ok(result)
  }
  /// Устанавливает значение целочисленного атрибута.
  fn set_<T: PrimInt, A: Into<c_uint>>(&self, value: T, attr: A, err: &ErrorHandle) -> Result<()> {
    let mut value = value;
    let res = unsafe {
      self.api().attr_set(
        self.native() as *mut c_void, self.holder_type(),
        &mut value as *mut T as *mut c_void, 0,
        attr.into(), err.native_mut()
      )
    };
    err.check(res).map(|_| ())
  }
  /// Получает значение строкового атрибута. Строка копируется, т.к. память под нее принадлежит хендлу.
  fn get_str<A: Into<c_uint>>(&self, attr: A, err: &ErrorHandle) -> Result<String> {
    let mut value: *const u8 = ptr::null();
    let mut size: c_uint = 0;
    let res = unsafe {
      self.api().attr_get(
        self.native(), self.holder_type(),
        &mut value as *mut *const u8 as *mut c_void, &mut size,
        attr.into(), err.native_mut()
      )
    };
    err.check(res)?;
    if value.is_null() {
      return Ok(String::new());
    }
    let bytes = unsafe { slice::from_raw_parts(value, size as usize) };
    String::from_utf8(bytes.to_vec()).map_err(|_| Error::Conversion(Type::CHR))
  }
  /// Устанавливает значение строкового атрибута.
  fn set_str<A: Into<c_uint>>(&self, value: &str, attr: A, err: &ErrorHandle) -> Result<()> {
    let res = unsafe {
      self.api().attr_set(
        self.native() as *mut c_void, self.holder_type(),
        value.as_ptr() as *mut c_void, value.len() as c_uint,
        attr.into(), err.native_mut()
      )
    };
    err.check(res).map(|_| ())
  }
  /// Ассоциирует с данным хендлом другой хендл, например, хендл сервера с контекстом сервиса.
  fn set_handle<T: NativeHandle, A: Into<c_uint>>(&self, value: &Handle<T>, attr: A, err: &ErrorHandle) -> Result<()> {
    let res = unsafe {
      self.api().attr_set(
        self.native() as *mut c_void, self.holder_type(),
        value.native_mut() as *mut c_void, 0,
        attr.into(), err.native_mut()
      )
    };
    err.check(res).map(|_| ())
  }
  /// Получает дескриптор параметра, хранящийся в атрибуте (например, список столбцов таблицы).
  /// Полученный дескриптор принадлежит данному объекту и никогда не освобождается.
  fn get_param<'a, A: Into<c_uint>>(&'a self, attr: A, err: &'a ErrorHandle) -> Result<Param<'a>> {
    let mut param: *mut c_void = ptr::null_mut();
    let res = unsafe {
      self.api().attr_get(
        self.native(), self.holder_type(),
        &mut param as *mut *mut c_void as *mut c_void, ptr::null_mut(),
        attr.into(), err.native_mut()
      )
    };
    err.check(res)?;
    Ok(Param::from_raw(param, self.api(), err))
  }
}
