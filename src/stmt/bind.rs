//! Связывание входных параметров выражения. Каждый вид связывания владеет буферами, адреса которых переданы
//! нативной библиотеке, поэтому буферы живут в куче и не перемещаются, пока жив объект связывания.

use std::mem;
use std::os::raw::{c_uint, c_ushort, c_void};
use std::ptr;

use log::trace;

use crate::Result;
use crate::convert::{FromDB, Value};
use crate::error::Error;
use crate::ffi::{ArrayDescriptor, ErrorHandle, GenericDescriptor, Env, Oci, OCIBind, OCIStmt};
use crate::ffi::types::OCIInd;
use crate::object::ObjectType;
use crate::types::{DescriptorType, Type};

use super::Indicator;
use super::index::BindIndex;

/// Адреса буферов, передаваемые в `OCIBindByPos2()`/`OCIBindByName2()`.
struct Target {
  valuep: *mut c_void,
  value_sz: i64,
  dty: Type,
  indp: *mut c_void,
  alenp: *mut u32,
  rcodep: *mut c_ushort,
}
impl Target {
  fn null(dty: Type) -> Self {
    Target {
      valuep: ptr::null_mut(),
      value_sz: 0,
      dty: dty,
      indp: ptr::null_mut(),
      alenp: ptr::null_mut(),
      rcodep: ptr::null_mut(),
    }
  }
}

/// Вызывает нативную функцию связывания по позиции или по имени, в зависимости от индекса.
fn bind_native(api: &dyn Oci, stmt: *mut OCIStmt, err: &ErrorHandle, index: BindIndex, t: Target) -> Result<*mut OCIBind> {
  let mut handle = ptr::null_mut();
  let res = match index {
    BindIndex::Index(pos) => unsafe {
      api.bind_by_pos(
        stmt, &mut handle, err.native_mut(),
        pos as c_uint,
        t.valuep, t.value_sz, t.dty.code(),
        t.indp, t.alenp, t.rcodep,
        0, ptr::null_mut(), 0
      )
    },
    BindIndex::Name(name) => {
      // Нативная библиотека ищет переменную по имени вместе с двоеточием
      let name = if name.starts_with(':') { name.to_owned() } else { format!(":{}", name) };
      unsafe {
        api.bind_by_name(
          stmt, &mut handle, err.native_mut(),
          name.as_ptr(), name.len() as i32,
          t.valuep, t.value_sz, t.dty.code(),
          t.indp, t.alenp, t.rcodep,
          0, ptr::null_mut(), 0
        )
      }
    },
  };
  err.check(res)?;
  trace!("bind {} as {:?}, {} bytes", index, t.dty, t.value_sz);
  Ok(handle)
}

/// Внешний тип и вид дескриптора, которыми связываются значения, хранимые в дескрипторах.
pub(crate) fn descriptor_kind(ty: Type) -> Option<DescriptorType> {
  match ty {
    Type::CLOB | Type::BLOB => Some(DescriptorType::Lob),
    Type::BFILEE | Type::CFILEE => Some(DescriptorType::File),
    Type::RDD => Some(DescriptorType::RowID),
    _ => None,
  }
}

//-------------------------------------------------------------------------------------------------
/// Связанный с выражением параметр. Вид связывания выбирается при создании и не меняется.
#[derive(Debug)]
pub enum Bind {
  /// Одно значение
  Scalar(ScalarBind),
  /// Массив значений для пакетного выполнения DML
  Array(ArrayBind),
  /// Один или несколько дескрипторов (LOB-локаторы, `ROWID`)
  Descriptor(DescriptorBind),
  /// Экземпляр пользовательского типа
  Object(ObjectBind),
}
impl Bind {
  /// Количество строк, которое несет связывание. Для скалярных значений и объектов всегда `1`.
  pub fn rows(&self) -> u32 {
    match *self {
      Bind::Array(ref a) => a.rows(),
      Bind::Descriptor(ref d) => d.len() as u32,
      Bind::Scalar(_) | Bind::Object(_) => 1,
    }
  }
  /// Хендл связывания, возвращенный нативной библиотекой. Принадлежит хендлу выражения.
  pub fn handle(&self) -> *mut OCIBind {
    match *self {
      Bind::Scalar(ref b) => b.handle,
      Bind::Array(ref b) => b.handle,
      Bind::Descriptor(ref b) => b.handle,
      Bind::Object(ref b) => b.handle,
    }
  }
}
//-------------------------------------------------------------------------------------------------
/// Связывание одного значения. Буфер и внешний тип фиксируются в момент связывания.
///
/// Буфер может быть больше входного значения: тогда нативная библиотека сможет записать в него выходное
/// значение PL/SQL блока (`OUT` и `IN OUT` параметры). Реальная длина данных, индикатор `NULL` и код
/// возврата хранятся в отдельной структуре в куче.
#[derive(Debug)]
pub struct ScalarBind {
  handle: *mut OCIBind,
  ty: Type,
  value: Value,
  buf: Vec<u8>,
  slot: Box<Indicator>,
}
impl ScalarBind {
  /// # Параметры
  /// - capacity:
  ///   Минимальный размер буфера в байтах. Если представление значения короче, буфер дополняется нулями.
  pub(crate) fn new(api: &dyn Oci, stmt: *mut OCIStmt, err: &ErrorHandle, index: BindIndex, value: Value, capacity: usize) -> Result<Self> {
    let mut buf = value.to_bytes()?;
    let mut slot = Box::new(Indicator::default());
    slot.len = buf.len() as u32;
    if value.is_null() {
      slot.ind = OCIInd::Null as i16;
    }
    if buf.len() < capacity {
      buf.resize(capacity, 0);
    }
    let ty = value.ty();
    let target = Target {
      valuep: if buf.is_empty() { ptr::null_mut() } else { buf.as_mut_ptr() as *mut c_void },
      value_sz: buf.len() as i64,
      dty: ty,
      indp: &mut slot.ind as *mut i16 as *mut c_void,
      alenp: &mut slot.len,
      rcodep: &mut slot.code,
    };
    let handle = bind_native(api, stmt, err, index, target)?;
    Ok(ScalarBind { handle: handle, ty: ty, value: value, buf: buf, slot: slot })
  }
  /// Внешний тип, с которым связан буфер
  #[inline]
  pub fn ty(&self) -> Type {
    self.ty
  }
  /// Значение, переданное при связывании. Выходное значение PL/SQL блока читается через [`get`][1].
  ///
  /// [1]: #method.get
  #[inline]
  pub fn value(&self) -> &Value {
    &self.value
  }
  /// Текущее содержимое буфера: до выполнения это входное значение, после выполнения PL/SQL блока то,
  /// что записал сервер.
  #[inline]
  pub fn bytes(&self) -> &[u8] {
    let len = (self.slot.len as usize).min(self.buf.len());
    &self.buf[..len]
  }
  /// Размер буфера, выделенного под значение
  #[inline]
  pub fn capacity(&self) -> usize {
    self.buf.len()
  }
  /// Признак `NULL` в буфере
  #[inline]
  pub fn is_null(&self) -> bool {
    self.slot.ind == OCIInd::Null as i16
  }
  /// Код возврата, записанный нативной библиотекой (например, `1406` при усечении выходного значения).
  #[inline]
  pub fn return_code(&self) -> u16 {
    self.slot.code
  }
  /// Преобразует содержимое буфера в значение Rust. `None`, если в буфере `NULL`.
  pub fn get<T: FromDB>(&self) -> Result<Option<T>> {
    if self.is_null() {
      return Ok(None);
    }
    T::from_db(self.ty, self.bytes()).map(Some)
  }
}
/// Размер буфера для выходного значения внешнего типа `ty`. Для чисел `capacity` задает ширину в байтах,
/// для строк и двоичных данных максимальную длину. `None`, если тип не может быть выходным параметром.
pub(crate) fn out_size(ty: Type, capacity: usize) -> Option<usize> {
  match ty {
    Type::INT | Type::UIN => match capacity {
      1 | 2 | 4 | 8 => Some(capacity),
      _ => None,
    },
    Type::BFLOAT => Some(4),
    Type::BDOUBLE => Some(8),
    Type::DAT => Some(7),
    Type::CHR | Type::BIN if capacity > 0 => Some(capacity),
    _ => None,
  }
}
//-------------------------------------------------------------------------------------------------
/// Связывание массива значений одного типа. Значения лежат в одном непрерывном буфере, каждое занимает
/// `width` байт. Для каждой строки хранится индикатор `NULL` и реальная длина значения.
#[derive(Debug)]
pub struct ArrayBind {
  handle: *mut OCIBind,
  ty: Type,
  width: usize,
  buf: Vec<u8>,
  inds: Vec<i16>,
  lens: Vec<u32>,
  codes: Vec<c_ushort>,
}
impl ArrayBind {
  /// # Параметры
  /// - ty:
  ///   Внешний тип элементов. Все значения, отличные от `NULL`, должны иметь этот тип
  pub(crate) fn new(api: &dyn Oci, stmt: *mut OCIStmt, err: &ErrorHandle, index: BindIndex, ty: Type, values: &[Value]) -> Result<Self> {
    let mut bytes = Vec::with_capacity(values.len());
    for v in values {
      if !v.is_null() && v.ty() != ty {
        return Err(Error::Conversion(v.ty()));
      }
      bytes.push(v.to_bytes()?);
    }
    let width = bytes.iter().map(Vec::len).max().unwrap_or(0).max(1);

    let mut buf = vec![0u8; width * values.len()];
    let mut inds = Vec::with_capacity(values.len());
    let mut lens = Vec::with_capacity(values.len());
    for (i, (v, b)) in values.iter().zip(bytes.iter()).enumerate() {
      buf[i * width..i * width + b.len()].copy_from_slice(b);
      inds.push(if v.is_null() { OCIInd::Null } else { OCIInd::NotNull } as i16);
      lens.push(b.len() as u32);
    }
    let mut codes = vec![0; values.len()];

    let target = Target {
      valuep: buf.as_mut_ptr() as *mut c_void,
      value_sz: width as i64,
      dty: ty,
      indp: inds.as_mut_ptr() as *mut c_void,
      alenp: lens.as_mut_ptr(),
      rcodep: codes.as_mut_ptr(),
    };
    let handle = bind_native(api, stmt, err, index, target)?;
    Ok(ArrayBind { handle: handle, ty: ty, width: width, buf: buf, inds: inds, lens: lens, codes: codes })
  }
  /// Количество строк в массиве
  #[inline]
  pub fn rows(&self) -> u32 {
    self.inds.len() as u32
  }
  /// Внешний тип элементов массива
  #[inline]
  pub fn ty(&self) -> Type {
    self.ty
  }
  /// Размер одного элемента в буфере
  #[inline]
  pub fn width(&self) -> usize {
    self.width
  }
  /// Данные строки `row`, или `None`, если в строке `NULL` или такой строки нет.
  pub fn row(&self, row: usize) -> Option<&[u8]> {
    match self.inds.get(row) {
      Some(&ind) if ind != OCIInd::Null as i16 => {
        let start = row * self.width;
        Some(&self.buf[start..start + self.lens[row] as usize])
      },
      _ => None,
    }
  }
  /// Коды возврата по строкам, заполняемые нативной библиотекой при выполнении.
  #[inline]
  pub fn return_codes(&self) -> &[c_ushort] {
    &self.codes
  }
}
//-------------------------------------------------------------------------------------------------
/// Дескрипторы, адреса которых переданы в связывание.
#[derive(Debug)]
pub enum DescriptorStorage {
  /// Один дескриптор. Хранится в куче, т.к. нативной библиотеке передается адрес указателя на него
  Single(Box<GenericDescriptor>),
  /// Массив дескрипторов для пакетного выполнения
  Array(ArrayDescriptor),
}
/// Связывание LOB-локаторов, файловых локаторов или `ROWID`.
#[derive(Debug)]
pub struct DescriptorBind {
  handle: *mut OCIBind,
  ty: Type,
  storage: DescriptorStorage,
  inds: Vec<i16>,
}
impl DescriptorBind {
  /// Выделяет `count` дескрипторов вида, соответствующего внешнему типу `ty`, и связывает их. При `count == 1`
  /// выделяется одиночный дескриптор, иначе массив.
  pub(crate) fn new(env: &Env, stmt: *mut OCIStmt, err: &ErrorHandle, index: BindIndex, ty: Type, count: usize) -> Result<Self> {
    let kind = descriptor_kind(ty).ok_or(Error::Conversion(ty))?;
    let mut storage = if count == 1 {
      DescriptorStorage::Single(Box::new(GenericDescriptor::new(env, kind)?))
    } else {
      DescriptorStorage::Array(ArrayDescriptor::new(env, kind, count)?)
    };
    let mut inds = vec![OCIInd::NotNull as i16; count];
    let valuep = match storage {
      DescriptorStorage::Single(ref mut d) => d.address_mut(),
      DescriptorStorage::Array(ref mut a) => a.as_mut_ptr() as *mut c_void,
    };
    let target = Target {
      valuep: valuep,
      value_sz: mem::size_of::<*mut c_void>() as i64,
      indp: inds.as_mut_ptr() as *mut c_void,
      ..Target::null(ty)
    };
    let handle = bind_native(&**env.api(), stmt, err, index, target)?;
    Ok(DescriptorBind { handle: handle, ty: ty, storage: storage, inds: inds })
  }
  /// Внешний тип, с которым связаны дескрипторы
  #[inline]
  pub fn ty(&self) -> Type {
    self.ty
  }
  /// Количество связанных дескрипторов
  pub fn len(&self) -> usize {
    match self.storage {
      DescriptorStorage::Single(_) => 1,
      DescriptorStorage::Array(ref a) => a.len(),
    }
  }
  /// Признак отсутствия дескрипторов
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
  /// Связанные дескрипторы
  #[inline]
  pub fn storage(&self) -> &DescriptorStorage {
    &self.storage
  }
  /// Индикаторы `NULL` по строкам
  #[inline]
  pub fn indicators(&self) -> &[i16] {
    &self.inds
  }
}
//-------------------------------------------------------------------------------------------------
/// Указатели на экземпляр объекта и его структуру индикаторов. Нативная библиотека получает их адреса.
#[derive(Debug)]
pub(crate) struct ObjectSlots {
  pub instance: *mut c_void,
  pub null_struct: *mut c_void,
}
/// Связывание экземпляра пользовательского типа. Атрибуты объекта не разбираются, экземпляр передается
/// нативной библиотеке как есть.
#[derive(Debug)]
pub struct ObjectBind {
  handle: *mut OCIBind,
  type_name: String,
  slots: Box<ObjectSlots>,
}
impl ObjectBind {
  /// # Safety
  /// `instance` и `null_struct` должны указывать на экземпляр типа `ty` в кеше объектов и жить до выполнения
  /// выражения.
  pub(crate) unsafe fn new(api: &dyn Oci, stmt: *mut OCIStmt, err: &ErrorHandle, index: BindIndex,
                           ty: &ObjectType, instance: *mut c_void, null_struct: *mut c_void) -> Result<Self> {
    let handle = bind_native(api, stmt, err, index, Target::null(Type::NTY))?;
    let mut slots = Box::new(ObjectSlots { instance: instance, null_struct: null_struct });
    let indpp = if null_struct.is_null() { ptr::null_mut() } else { &mut slots.null_struct as *mut *mut c_void };
    let res = api.bind_object(
      handle, err.native_mut(), ty.native(),
      &mut slots.instance, ptr::null_mut(),
      indpp, ptr::null_mut()
    );
    err.check(res)?;
    Ok(ObjectBind { handle: handle, type_name: format!("{}.{}", ty.schema(), ty.name()), slots: slots })
  }
  /// Полное имя типа связанного объекта
  #[inline]
  pub fn type_name(&self) -> &str {
    &self.type_name
  }
  /// Указатель на связанный экземпляр
  #[inline]
  pub fn instance(&self) -> *mut c_void {
    self.slots.instance
  }
}
