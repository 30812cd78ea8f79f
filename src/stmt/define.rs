//! Буферы для извлечения столбцов списка выбора. Вид буфера и его размер выбираются по описанию столбца.

use std::any::Any;
use std::mem;
use std::os::raw::{c_uint, c_void};
use std::ptr;

use log::debug;

use crate::{Result, ServiceContext};
use crate::convert::FromDB;
use crate::error::Error;
use crate::ffi::{ErrorHandle, GenericDescriptor, OCIDefine, OCIRowid, OCIStmt, OCIType};
use crate::ffi::types::{execute_mode, OCIInd};
use crate::object::ObjectType;
use crate::types::{DescriptorType, Type};

use super::{rowid_to_string, Column, Indicator};
use super::bind::ObjectSlots;

/// Способ извлечения столбца.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Layout {
  /// Данные извлекаются в буфер указанного размера в указанном внешнем типе
  Buffer(Type, usize),
  /// Извлекается дескриптор указанного вида
  Descriptor(Type, DescriptorType),
  /// Экземпляр пользовательского типа
  Object,
  /// Экземпляр коллекции
  Collection,
}

/// Размер буфера для типов, которые библиотека не умеет извлекать в родном виде. Такие столбцы
/// извлекаются текстом, который формирует сервер.
const TEXT_FALLBACK: usize = 128;

/// Выбирает способ извлечения столбца по его описанию.
pub(crate) fn layout(column: &Column) -> Layout {
  let size = column.size as usize;
  match column.ty() {
    Some(Type::NUM) | Some(Type::VNU) => {
      // Целые числа, гарантированно помещающиеся в 64 бита
      if column.scale == 0 && column.precision > 0 && column.precision <= 18 {
        Layout::Buffer(Type::INT, 8)
      } else {
        Layout::Buffer(Type::BDOUBLE, 8)
      }
    },
    Some(Type::INT) => Layout::Buffer(Type::INT, 8),
    Some(Type::UIN) => Layout::Buffer(Type::UIN, 8),
    Some(Type::BFLOAT) | Some(Type::IBFLOAT) => Layout::Buffer(Type::BFLOAT, 4),
    Some(Type::BDOUBLE) | Some(Type::IBDOUBLE) => Layout::Buffer(Type::BDOUBLE, 8),

    Some(Type::CHR) | Some(Type::AFC) | Some(Type::VCS) |
    Some(Type::STR) | Some(Type::AVC) | Some(Type::LNG) => {
      // В худшем случае символ занимает 4 байта
      let len = if column.char_used { column.char_size as usize * 4 } else { size };
      Layout::Buffer(Type::CHR, len.max(1))
    },
    Some(Type::BIN) | Some(Type::VBI) | Some(Type::LBI) => Layout::Buffer(Type::BIN, size.max(1)),
    Some(Type::DAT) => Layout::Buffer(Type::DAT, 7),

    Some(Type::RID) | Some(Type::RDD) => Layout::Descriptor(Type::RDD, DescriptorType::RowID),
    Some(Type::CLOB) => Layout::Descriptor(Type::CLOB, DescriptorType::Lob),
    Some(Type::BLOB) => Layout::Descriptor(Type::BLOB, DescriptorType::Lob),
    Some(Type::BFILEE) => Layout::Descriptor(Type::BFILEE, DescriptorType::File),
    Some(Type::CFILEE) => Layout::Descriptor(Type::CFILEE, DescriptorType::File),

    Some(Type::NTY) | Some(Type::REF) => Layout::Object,
    Some(Type::NCO) => Layout::Collection,

    _ => Layout::Buffer(Type::CHR, size.max(TEXT_FALLBACK)),
  }
}

/// Адреса, передаваемые в `OCIDefineByPos2()`.
struct Target {
  valuep: *mut c_void,
  value_sz: i64,
  dty: Type,
  slot: *mut Indicator,
}

fn define_native(conn: &ServiceContext, stmt: *mut OCIStmt, pos: usize, t: Target) -> Result<*mut OCIDefine> {
  let mut handle = ptr::null_mut();
  let err = conn.error();
  let res = unsafe {
    conn.api().define_by_pos(
      stmt, &mut handle, err.native_mut(),
      pos as c_uint,
      t.valuep, t.value_sz, t.dty.code(),
      &mut (*t.slot).ind as *mut i16 as *mut c_void,
      &mut (*t.slot).len,
      &mut (*t.slot).code,
      execute_mode::DEFAULT
    )
  };
  err.check(res)?;
  Ok(handle)
}
/// Связывает хендл определения с описанием пользовательского типа вызовом `OCIDefineObject()`.
fn define_object(conn: &ServiceContext, handle: *mut OCIDefine, tdo: *mut OCIType, slots: &mut ObjectSlots) -> Result<()> {
  let err = conn.error();
  let res = unsafe {
    conn.api().define_object(
      handle, err.native_mut(), tdo,
      &mut slots.instance, ptr::null_mut(),
      &mut slots.null_struct, ptr::null_mut()
    )
  };
  err.check(res).map(|_| ())
}

//-------------------------------------------------------------------------------------------------
/// Буфер для извлечения одного столбца. Вид буфера выбирается по описанию столбца при создании.
#[derive(Debug)]
pub enum Define {
  /// Значение извлекается в буфер памяти
  Scalar(ScalarDefine),
  /// Извлекается дескриптор: LOB-локатор, файловый локатор или `ROWID`
  Descriptor(DescriptorDefine),
  /// Извлекается экземпляр пользовательского типа
  Object(ObjectDefine),
  /// Извлекается экземпляр коллекции
  Collection(CollectionDefine),
}
impl Define {
  pub(crate) fn new(conn: &ServiceContext, stmt: *mut OCIStmt, column: Column) -> Result<Self> {
    let pos = column.pos + 1;
    let layout = layout(&column);
    debug!("define column {} `{}` as {:?}", pos, column.name, layout);

    let mut slot = Box::new(Indicator::default());
    Ok(match layout {
      Layout::Buffer(ty, size) => {
        let mut buf = vec![0u8; size];
        let target = Target {
          valuep: buf.as_mut_ptr() as *mut c_void,
          value_sz: size as i64,
          dty: ty,
          slot: &mut *slot,
        };
        let handle = define_native(conn, stmt, pos, target)?;
        Define::Scalar(ScalarDefine { column: column, handle: handle, ty: ty, buf: buf, slot: slot })
      },
      Layout::Descriptor(ty, kind) => {
        let mut desc = Box::new(GenericDescriptor::new(conn.env(), kind)?);
        let target = Target {
          valuep: desc.address_mut(),
          value_sz: mem::size_of::<*mut c_void>() as i64,
          dty: ty,
          slot: &mut *slot,
        };
        let handle = define_native(conn, stmt, pos, target)?;
        Define::Descriptor(DescriptorDefine { column: column, handle: handle, ty: ty, desc: desc, slot: slot })
      },
      Layout::Object | Layout::Collection => {
        let tdo = ObjectType::by_name(conn, &column.schema_name, &column.type_name)?.native();
        let target = Target {
          valuep: ptr::null_mut(),
          value_sz: 0,
          dty: Type::NTY,
          slot: &mut *slot,
        };
        let handle = define_native(conn, stmt, pos, target)?;
        let mut slots = Box::new(ObjectSlots { instance: ptr::null_mut(), null_struct: ptr::null_mut() });
        define_object(conn, handle, tdo, &mut slots)?;
        let inner = ObjectDefine { column: column, handle: handle, tdo: tdo, slots: slots, slot: slot };
        if layout == Layout::Collection {
          Define::Collection(CollectionDefine(inner))
        } else {
          Define::Object(inner)
        }
      },
    })
  }
  /// Описание извлекаемого столбца
  pub fn column(&self) -> &Column {
    match *self {
      Define::Scalar(ref d) => &d.column,
      Define::Descriptor(ref d) => &d.column,
      Define::Object(ref d) => &d.column,
      Define::Collection(ref d) => &d.0.column,
    }
  }
  /// Внешний тип, в котором извлекается столбец
  pub fn ty(&self) -> Type {
    match *self {
      Define::Scalar(ref d) => d.ty,
      Define::Descriptor(ref d) => d.ty,
      Define::Object(_) | Define::Collection(_) => Type::NTY,
    }
  }
  /// Хендл определения, возвращенный нативной библиотекой. Принадлежит хендлу выражения.
  pub fn handle(&self) -> *mut OCIDefine {
    match *self {
      Define::Scalar(ref d) => d.handle,
      Define::Descriptor(ref d) => d.handle,
      Define::Object(ref d) => d.handle,
      Define::Collection(ref d) => d.0.handle,
    }
  }
  /// Признак того, что в последней извлеченной строке в столбце `NULL`.
  pub fn is_null(&self) -> bool {
    match *self {
      Define::Scalar(ref d) => d.slot.ind == OCIInd::Null as i16,
      Define::Descriptor(ref d) => d.slot.ind == OCIInd::Null as i16,
      Define::Object(ref d) => d.is_null(),
      Define::Collection(ref d) => d.0.is_null(),
    }
  }
  /// Данные последней извлеченной строки в том виде, в каком их записала нативная библиотека, или
  /// `None`, если в столбце `NULL` или столбец извлекается не в буфер.
  pub fn raw(&self) -> Option<&[u8]> {
    match *self {
      Define::Scalar(ref d) => d.raw(),
      _ => None,
    }
  }
  /// Преобразует значение столбца в тип Rust. Для `NULL` возвращает `None`.
  pub fn get<T: FromDB>(&self) -> Result<Option<T>> {
    match *self {
      Define::Scalar(ref d) => match d.raw() {
        Some(raw) => T::from_db(d.ty, raw).map(Some),
        None => Ok(None),
      },
      _ => Err(Error::Conversion(self.ty())),
    }
  }
  /// Получает текстовое представление `ROWID` из столбца типа `ROWID`.
  pub fn rowid(&self, err: &ErrorHandle) -> Result<Option<String>> {
    match *self {
      Define::Descriptor(ref d) if d.ty == Type::RDD => {
        if d.slot.ind == OCIInd::Null as i16 {
          return Ok(None);
        }
        rowid_to_string(err.api(), d.desc.native() as *mut OCIRowid, err).map(Some)
      },
      _ => Err(Error::Conversion(self.ty())),
    }
  }
}
//-------------------------------------------------------------------------------------------------
/// Буфер памяти под значение столбца.
#[derive(Debug)]
pub struct ScalarDefine {
  column: Column,
  handle: *mut OCIDefine,
  ty: Type,
  buf: Vec<u8>,
  slot: Box<Indicator>,
}
impl ScalarDefine {
  fn raw(&self) -> Option<&[u8]> {
    if self.slot.ind == OCIInd::Null as i16 {
      return None;
    }
    let len = (self.slot.len as usize).min(self.buf.len());
    Some(&self.buf[..len])
  }
  /// Размер буфера
  #[inline]
  pub fn capacity(&self) -> usize {
    self.buf.len()
  }
  /// Код возврата столбца для последней извлеченной строки. Ненулевой код означает, например, усечение данных.
  #[inline]
  pub fn return_code(&self) -> u16 {
    self.slot.code
  }
}
/// Дескриптор, в который извлекается столбец.
#[derive(Debug)]
pub struct DescriptorDefine {
  column: Column,
  handle: *mut OCIDefine,
  ty: Type,
  desc: Box<GenericDescriptor>,
  slot: Box<Indicator>,
}
impl DescriptorDefine {
  /// Дескриптор, в который извлекается значение последней строки
  #[inline]
  pub fn descriptor(&self) -> &GenericDescriptor {
    &self.desc
  }
}
/// Экземпляр пользовательского типа, извлекаемый в кеш объектов. Атрибуты объекта не разбираются.
#[derive(Debug)]
pub struct ObjectDefine {
  column: Column,
  handle: *mut OCIDefine,
  tdo: *mut OCIType,
  slots: Box<ObjectSlots>,
  slot: Box<Indicator>,
}
impl ObjectDefine {
  fn is_null(&self) -> bool {
    self.slots.instance.is_null() || self.slot.ind == OCIInd::Null as i16
  }
  /// Указатель на экземпляр последней извлеченной строки в кеше объектов
  #[inline]
  pub fn instance(&self) -> *mut c_void {
    self.slots.instance
  }
  /// Указатель на структуру индикаторов `NULL` атрибутов экземпляра
  #[inline]
  pub fn null_struct(&self) -> *mut c_void {
    self.slots.null_struct
  }
  /// Описание типа, с которым определен столбец
  #[inline]
  pub fn tdo(&self) -> *mut OCIType {
    self.tdo
  }
  /// Представление экземпляра в виде объекта Rust. Разбор атрибутов пользовательских типов не поддерживается,
  /// поэтому всегда возвращает `None`.
  pub fn as_object(&self) -> Option<&dyn Any> {
    None
  }
}
/// Экземпляр коллекции (`VARRAY` или вложенной таблицы), извлекаемый в кеш объектов.
#[derive(Debug)]
pub struct CollectionDefine(ObjectDefine);
impl CollectionDefine {
  /// Указатель на экземпляр коллекции последней извлеченной строки
  #[inline]
  pub fn instance(&self) -> *mut c_void {
    self.0.instance()
  }
  /// Указатель на структуру индикаторов `NULL` коллекции
  #[inline]
  pub fn null_struct(&self) -> *mut c_void {
    self.0.null_struct()
  }
  /// Представление коллекции в виде объекта Rust. Разбор элементов коллекций не поддерживается,
  /// поэтому всегда возвращает `None`.
  pub fn as_collection(&self) -> Option<&dyn Any> {
    None
  }
}
