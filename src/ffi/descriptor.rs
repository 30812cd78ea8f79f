use std::fmt;
use std::marker::PhantomData;
use std::os::raw::{c_uint, c_void};
use std::ptr;

use log::{trace, warn};

use crate::Result;
use crate::error::Error;
use crate::types::{DescriptorType, HandleType};

use super::{check_with, decode, Api, Env, ErrorHandle, NativeDescriptor, Oci, OCIParam};
use super::attr::AttrHolder;
use super::types::status;

/// Освобождает дескриптор указанного типа. Единственное место, где вызывается `OCIDescriptorFree()`.
///
/// Дескрипторы параметров (`OCI_DTYPE_PARAM`) принадлежат вызову, который их вернул, поэтому для них
/// функция ничего не освобождает и возвращает ошибку [`DescriptorLifecycle`][1]. Та же ошибка возвращается
/// для нулевого указателя, т.е. уже освобожденного дескриптора.
///
/// [1]: ../error/enum.Error.html#variant.DescriptorLifecycle
pub fn free_descriptor(api: &dyn Oci, native: *mut c_void, kind: DescriptorType) -> Result<()> {
  match kind {
    DescriptorType::Param => Err(Error::DescriptorLifecycle(kind)),
    _ if native.is_null() => Err(Error::DescriptorLifecycle(kind)),
    _ => {
      trace!("free descriptor {:?} {:p}", kind, native);
      let res = unsafe { api.descriptor_free(native, kind.code()) };
      match res {
        status::SUCCESS => Ok(()),
        // Функция не пишет диагностику, только код возврата
        e => Err(Error::Db { handle: HandleType::Env, source: decode(api, ptr::null_mut(), HandleType::Env, e) }),
      }
    }
  }
}
fn alloc(env: &Env, kind: DescriptorType) -> Result<*mut c_void> {
  let mut desc = ptr::null_mut();
  let res = unsafe {
    env.api().descriptor_alloc(env.native() as *const c_void, &mut desc, kind.code())
  };
  check_with(&**env.api(), env.native() as *mut c_void, HandleType::Env, res)?;
  trace!("alloc descriptor {:?} {:p}", kind, desc);
  Ok(desc)
}
//-------------------------------------------------------------------------------------------------
/// Автоматически освобождаемый дескриптор, тип которого известен только во время выполнения.
/// Используется для связывания и извлечения LOB-локаторов, `ROWID` и т.п., когда тип выбирается по
/// описанию столбца.
pub struct GenericDescriptor {
  /// Указатель на дескриптор. Обнуляется после освобождения.
  native: *mut c_void,
  kind: DescriptorType,
  api: Api,
}
impl GenericDescriptor {
  /// Создает дескриптор указанного вида вызовом `OCIDescriptorAlloc()`.
  pub fn new(env: &Env, kind: DescriptorType) -> Result<Self> {
    let native = alloc(env, kind)?;
    Ok(GenericDescriptor { native: native, kind: kind, api: env.api().clone() })
  }
  /// Вид дескриптора
  #[inline]
  pub fn kind(&self) -> DescriptorType {
    self.kind
  }
  /// Указатель на дескриптор для передачи в нативные функции.
  #[inline]
  pub fn native(&self) -> *mut c_void {
    self.native
  }
  /// Адрес переменной, хранящей указатель на дескриптор. Именно он передается в функции связывания
  /// в качестве буфера значения.
  #[inline]
  pub fn address_mut(&mut self) -> *mut c_void {
    &mut self.native as *mut *mut c_void as *mut c_void
  }
  /// Явно освобождает дескриптор. Повторный вызов возвращает ошибку [`DescriptorLifecycle`][1] и не
  /// обращается к нативной библиотеке.
  ///
  /// [1]: ../error/enum.Error.html#variant.DescriptorLifecycle
  pub fn free(&mut self) -> Result<()> {
    let native = self.native;
    free_descriptor(&*self.api, native, self.kind)?;
    self.native = ptr::null_mut();
    Ok(())
  }
}
impl Drop for GenericDescriptor {
  fn drop(&mut self) {
    if self.native.is_null() {
      return;
    }
    if let Err(e) = self.free() {
      warn!("{}", e);
    }
  }
}
impl fmt::Debug for GenericDescriptor {
  fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
    fmt.debug_tuple("GenericDescriptor")
       .field(&self.kind)
       .field(&self.native)
       .finish()
  }
}
impl AttrHolder for GenericDescriptor {
  fn holder_type(&self) -> c_uint {
    self.kind.code()
  }
  fn native(&self) -> *const c_void {
    self.native
  }
  fn api(&self) -> &dyn Oci {
    &*self.api
  }
}
//-------------------------------------------------------------------------------------------------
/// Автоматически освобождаемый дескриптор ресурсов оракла, тип которого известен на этапе компиляции
pub struct Descriptor<T: NativeDescriptor> {
  inner: GenericDescriptor,
  phantom: PhantomData<*mut T>,
}
impl<T: NativeDescriptor> Descriptor<T> {
  /// Создает дескриптор вызовом `OCIDescriptorAlloc()`.
  pub fn new(env: &Env) -> Result<Self> {
    Ok(Descriptor { inner: GenericDescriptor::new(env, T::ID)?, phantom: PhantomData })
  }
  /// Типизированный указатель на дескриптор для передачи в нативные функции.
  #[inline]
  pub fn native_mut(&self) -> *mut T {
    self.inner.native() as *mut T
  }
}
impl<T: NativeDescriptor> From<Descriptor<T>> for GenericDescriptor {
  fn from(d: Descriptor<T>) -> Self {
    d.inner
  }
}
impl<T: NativeDescriptor> fmt::Debug for Descriptor<T> {
  fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
    self.inner.fmt(fmt)
  }
}
//-------------------------------------------------------------------------------------------------
/// Массив дескрипторов одного вида, выделенных одним вызовом `OCIArrayDescriptorAlloc()` и освобождаемых
/// одним вызовом `OCIArrayDescriptorFree()`. Используется для связывания массивов LOB-локаторов и `ROWID`.
pub struct ArrayDescriptor {
  natives: Vec<*mut c_void>,
  kind: DescriptorType,
  api: Api,
}
impl ArrayDescriptor {
  /// Выделяет `count` дескрипторов вида `kind`.
  pub fn new(env: &Env, kind: DescriptorType, count: usize) -> Result<Self> {
    if kind == DescriptorType::Param {
      return Err(Error::DescriptorLifecycle(kind));
    }
    let mut natives = vec![ptr::null_mut(); count];
    let res = unsafe {
      env.api().array_descriptor_alloc(env.native() as *const c_void, natives.as_mut_ptr(), kind.code(), count as c_uint)
    };
    check_with(&**env.api(), env.native() as *mut c_void, HandleType::Env, res)?;
    trace!("alloc {} descriptors {:?}", count, kind);
    Ok(ArrayDescriptor { natives: natives, kind: kind, api: env.api().clone() })
  }
  /// Вид дескрипторов массива
  #[inline]
  pub fn kind(&self) -> DescriptorType {
    self.kind
  }
  /// Количество дескрипторов
  #[inline]
  pub fn len(&self) -> usize {
    self.natives.len()
  }
  /// Признак пустого массива
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.natives.is_empty()
  }
  /// Адрес массива указателей на дескрипторы, передаваемый в функции связывания.
  #[inline]
  pub fn as_mut_ptr(&mut self) -> *mut *mut c_void {
    self.natives.as_mut_ptr()
  }
}
impl Drop for ArrayDescriptor {
  fn drop(&mut self) {
    trace!("free {} descriptors {:?}", self.natives.len(), self.kind);
    let res = unsafe { self.api.array_descriptor_free(self.natives.as_mut_ptr(), self.kind.code()) };
    if res != status::SUCCESS {
      warn!("OCIArrayDescriptorFree({:?}) returned {}", self.kind, res);
    }
  }
}
impl fmt::Debug for ArrayDescriptor {
  fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
    fmt.debug_tuple("ArrayDescriptor")
       .field(&self.kind)
       .field(&self.natives.len())
       .finish()
  }
}
//-------------------------------------------------------------------------------------------------
/// Представление дескриптора параметра (`OCI_DTYPE_PARAM`), полученного из `OCIParamGet()` или из
/// атрибута другого хендла. Дескриптор принадлежит породившему его объекту и живет не дольше него, поэтому
/// представление ничего не освобождает при разрушении.
#[derive(Clone, Copy)]
pub struct Param<'p> {
  native: *mut OCIParam,
  api: &'p dyn Oci,
  err: &'p ErrorHandle,
}
impl<'p> Param<'p> {
  /// Оборачивает указатель, полученный от нативной функции.
  pub fn from_raw(native: *mut c_void, api: &'p dyn Oci, err: &'p ErrorHandle) -> Self {
    Param { native: native as *mut OCIParam, api: api, err: err }
  }
  /// Получает дескриптор параметра в позиции `pos` (нумерация с 1) у хендла или списка `parent`.
  pub fn get<H: AttrHolder + ?Sized>(parent: &'p H, pos: u32, err: &'p ErrorHandle) -> Result<Self> {
    let mut desc = ptr::null_mut();
    let res = unsafe {
      parent.api().param_get(parent.native(), parent.holder_type(), err.native_mut(), &mut desc, pos)
    };
    err.check(res)?;
    Ok(Param::from_raw(desc, parent.api(), err))
  }
  /// Получает дочерний параметр списка в позиции `pos` (нумерация с 1). Дочерний параметр живет столько же,
  /// сколько и родительский, т.к. оба принадлежат одному и тому же хендлу.
  pub fn child(&self, pos: u32) -> Result<Param<'p>> {
    let mut desc = ptr::null_mut();
    let res = unsafe {
      self.api.param_get(self.native as *const c_void, DescriptorType::Param.code(), self.err.native_mut(), &mut desc, pos)
    };
    self.err.check(res)?;
    Ok(Param::from_raw(desc, self.api, self.err))
  }
  /// Получает параметр, хранящийся в атрибуте данного параметра (например, список столбцов таблицы).
  pub fn attr_param<A: Into<c_uint>>(&self, attr: A) -> Result<Param<'p>> {
    let mut param: *mut c_void = ptr::null_mut();
    let res = unsafe {
      self.api.attr_get(
        self.native as *const c_void, DescriptorType::Param.code(),
        &mut param as *mut *mut c_void as *mut c_void, ptr::null_mut(),
        attr.into(), self.err.native_mut()
      )
    };
    self.err.check(res)?;
    Ok(Param::from_raw(param, self.api, self.err))
  }
  /// Хендл ошибок, с которым был получен параметр.
  #[inline]
  pub fn error(&self) -> &'p ErrorHandle {
    self.err
  }
  /// Указатель на дескриптор.
  #[inline]
  pub fn native_mut(&self) -> *mut OCIParam {
    self.native
  }
  /// Параметр нельзя освободить, т.к. им владеет породивший его вызов. Метод всегда возвращает
  /// ошибку [`DescriptorLifecycle`][1].
  ///
  /// [1]: ../error/enum.Error.html#variant.DescriptorLifecycle
  pub fn free(self) -> Result<()> {
    free_descriptor(self.api, self.native as *mut c_void, DescriptorType::Param)
  }
}
impl<'p> fmt::Debug for Param<'p> {
  fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
    fmt.debug_tuple("Param").field(&self.native).finish()
  }
}
impl<'p> AttrHolder for Param<'p> {
  fn holder_type(&self) -> c_uint {
    DescriptorType::Param.code()
  }
  fn native(&self) -> *const c_void {
    self.native as *const c_void
  }
  fn api(&self) -> &dyn Oci {
    self.api
  }
}
