//! Описание объектов базы данных через `OCIDescribeAny()`.
//!
//! Результат описания представляет собой дерево дескрипторов параметров, корень которого получается
//! методом [`Describe::parameter()`][1]. Вид каждого узла определяется атрибутом `OCI_ATTR_PTYPE`, узлы
//! представлены вариантами перечисления [`ParameterDescriptor`][2]. Все дескрипторы дерева принадлежат
//! хендлу описания и живут не дольше него, поэтому узлы заимствуют [`Describe`][3].
//!
//! [1]: struct.Describe.html#method.parameter
//! [2]: enum.ParameterDescriptor.html
//! [3]: struct.Describe.html

use std::fmt;
use std::os::raw::{c_uint, c_void};

use log::debug;

use crate::{Result, ServiceContext};
use crate::ffi::{AttrHolder, Handle, OCIDescribe, Param};
use crate::ffi::types::{Attr, ParamAttr, OTYPE_NAME};
use crate::types::{CharsetForm, ParameterType, Type};

/// Берет в кавычки каждую часть составного имени `schema.object`, чтобы сервер не приводил ее к верхнему
/// регистру. Части, уже взятые в кавычки, не изменяются.
fn quote(name: &str) -> String {
  name.split('.')
      .map(|part| if part.starts_with('"') { part.to_owned() } else { format!("\"{}\"", part) })
      .collect::<Vec<_>>()
      .join(".")
}

//-------------------------------------------------------------------------------------------------
/// Результат описания объекта базы данных. Владеет хендлом описания, которому принадлежат все
/// дескрипторы параметров, полученные из него.
pub struct Describe<'c> {
  conn: &'c ServiceContext<'c>,
  handle: Handle<OCIDescribe>,
  name: String,
}
impl<'c> Describe<'c> {
  /// Описывает объект с указанным именем.
  ///
  /// # OCI вызовы
  /// `OCIHandleAlloc()` для хендла описания и `OCIDescribeAny()`.
  ///
  /// # Запросы к серверу (1)
  pub fn new(conn: &'c ServiceContext<'c>, name: &str, ptype: ParameterType, case_sensitive: bool) -> Result<Self> {
    let handle: Handle<OCIDescribe> = Handle::new(conn.env())?;
    let name = if case_sensitive { quote(name) } else { name.to_owned() };
    let res = unsafe {
      conn.api().describe_any(
        conn.handle(), conn.error().native_mut(),
        name.as_ptr() as *mut c_void, name.len() as c_uint, OTYPE_NAME,
        0, ptype.code(),
        handle.native_mut()
      )
    };
    conn.error().check(res)?;
    debug!("described {} as {:?}", name, ptype);
    Ok(Describe { conn: conn, handle: handle, name: name })
  }
  /// Имя описанного объекта в том виде, в каком оно было передано серверу
  #[inline]
  pub fn name(&self) -> &str {
    &self.name
  }
  /// Соединение, в котором выполнено описание
  #[inline]
  pub fn service_context(&self) -> &'c ServiceContext<'c> {
    self.conn
  }
  /// Корневой дескриптор описания.
  pub fn parameter(&self) -> Result<ParameterDescriptor> {
    let param = self.handle.get_param(Attr::Param, self.conn.error())?;
    ParameterDescriptor::new(param)
  }
}
impl<'c> fmt::Debug for Describe<'c> {
  fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
    fmt.debug_struct("Describe")
       .field("name", &self.name)
       .field("handle", &self.handle)
       .finish()
  }
}

//-------------------------------------------------------------------------------------------------
/// Узел дерева описания. Вариант выбирается по атрибуту `OCI_ATTR_PTYPE` дескриптора.
#[derive(Clone, Copy, Debug)]
pub enum ParameterDescriptor<'p> {
  /// Таблица
  Table(TableViewBaseDescriptor<'p>),
  /// Представление
  View(TableViewBaseDescriptor<'p>),
  /// Столбец таблицы или представления
  Column(ColumnDescriptor<'p>),
  /// Список параметров (столбцов, объектов схемы, схем базы)
  List(ListDescriptor<'p>),
  /// Схема
  Schema(SchemaDescriptor<'p>),
  /// База данных
  Database(DatabaseDescriptor<'p>),
  /// Прочие виды объектов. Содержит код вида, т.к. он может быть неизвестен библиотеке
  Other(u8, Param<'p>),
}
impl<'p> ParameterDescriptor<'p> {
  /// Определяет вид дескриптора и оборачивает его в соответствующий вариант.
  pub fn new(param: Param<'p>) -> Result<Self> {
    let code: u8 = param.get_(ParamAttr::Ptype, param.error())?;
    Ok(match ParameterType::from_code(code) {
      Some(ParameterType::Table) => ParameterDescriptor::Table(TableViewBaseDescriptor(param)),
      Some(ParameterType::View) => ParameterDescriptor::View(TableViewBaseDescriptor(param)),
      Some(ParameterType::Column) => ParameterDescriptor::Column(ColumnDescriptor(param)),
      Some(ParameterType::List) => ParameterDescriptor::List(ListDescriptor(param)),
      Some(ParameterType::Schema) => ParameterDescriptor::Schema(SchemaDescriptor(param)),
      Some(ParameterType::Database) => ParameterDescriptor::Database(DatabaseDescriptor(param)),
      _ => ParameterDescriptor::Other(code, param),
    })
  }
  /// Вид описываемого объекта, если он известен библиотеке
  pub fn ptype(&self) -> Option<ParameterType> {
    match *self {
      ParameterDescriptor::Table(_) => Some(ParameterType::Table),
      ParameterDescriptor::View(_) => Some(ParameterType::View),
      ParameterDescriptor::Column(_) => Some(ParameterType::Column),
      ParameterDescriptor::List(_) => Some(ParameterType::List),
      ParameterDescriptor::Schema(_) => Some(ParameterType::Schema),
      ParameterDescriptor::Database(_) => Some(ParameterType::Database),
      ParameterDescriptor::Other(code, _) => ParameterType::from_code(code),
    }
  }
  /// Нижележащий дескриптор параметра
  pub fn param(&self) -> Param<'p> {
    match *self {
      ParameterDescriptor::Table(d) |
      ParameterDescriptor::View(d) => d.0,
      ParameterDescriptor::Column(d) => d.0,
      ParameterDescriptor::List(d) => d.0,
      ParameterDescriptor::Schema(d) => d.0,
      ParameterDescriptor::Database(d) => d.0,
      ParameterDescriptor::Other(_, p) => p,
    }
  }
  /// Имя объекта из атрибута `OCI_ATTR_OBJ_NAME`. Для элементов списка объектов схемы это имя элемента.
  pub fn object_name(&self) -> Result<String> {
    let param = self.param();
    param.get_str(ParamAttr::ObjName, param.error())
  }
}

macro_rules! attr {
  ($(#[$meta:meta])* fn $name:ident -> bool = $attr:ident) => (
    $(#[$meta])*
    pub fn $name(&self) -> Result<bool> {
      let value: u8 = self.0.get_(ParamAttr::$attr, self.0.error())?;
      Ok(value != 0)
    }
  );
  ($(#[$meta:meta])* fn $name:ident -> $ty:ty = $attr:ident) => (
    $(#[$meta])*
    pub fn $name(&self) -> Result<$ty> {
      self.0.get_(ParamAttr::$attr, self.0.error())
    }
  );
}
macro_rules! str_attr {
  ($(#[$meta:meta])* fn $name:ident = $attr:ident) => (
    $(#[$meta])*
    pub fn $name(&self) -> Result<String> {
      self.0.get_str(ParamAttr::$attr, self.0.error())
    }
  );
}

//-------------------------------------------------------------------------------------------------
/// Список дескрипторов параметров. Элементы нумеруются с 1 в том порядке, в каком их вернул сервер.
#[derive(Clone, Copy, Debug)]
pub struct ListDescriptor<'p>(Param<'p>);
impl<'p> ListDescriptor<'p> {
  /// Количество элементов списка
  pub fn len(&self) -> Result<usize> {
    let len: u16 = self.0.get_(ParamAttr::NumParams, self.0.error())?;
    Ok(len as usize)
  }
  /// Признак пустого списка
  pub fn is_empty(&self) -> Result<bool> {
    self.len().map(|len| len == 0)
  }
  /// Получает элемент списка по номеру (нумерация с 1).
  pub fn parameter(&self, index: usize) -> Result<ParameterDescriptor<'p>> {
    let param = self.0.child(index as u32)?;
    ParameterDescriptor::new(param)
  }
  /// Перебирает все элементы списка по порядку.
  pub fn iter(&self) -> Result<ListIter<'p>> {
    Ok(ListIter { list: *self, next: 1, len: self.len()? })
  }
}
/// Итератор по элементам [`ListDescriptor`](struct.ListDescriptor.html).
#[derive(Debug)]
pub struct ListIter<'p> {
  list: ListDescriptor<'p>,
  next: usize,
  len: usize,
}
impl<'p> Iterator for ListIter<'p> {
  type Item = Result<ParameterDescriptor<'p>>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.next > self.len {
      return None;
    }
    let item = self.list.parameter(self.next);
    self.next += 1;
    Some(item)
  }
  fn size_hint(&self) -> (usize, Option<usize>) {
    let rest = self.len + 1 - self.next;
    (rest, Some(rest))
  }
}

//-------------------------------------------------------------------------------------------------
/// Описание таблицы или представления.
#[derive(Clone, Copy, Debug)]
pub struct TableViewBaseDescriptor<'p>(Param<'p>);
impl<'p> TableViewBaseDescriptor<'p> {
  attr!(
    /// Количество столбцов
    fn column_count -> u16 = NumCols
  );
  attr!(
    /// Идентификатор объекта в словаре данных
    fn object_id -> u32 = ObjId
  );
  str_attr!(
    /// Имя таблицы или представления
    fn name = ObjName
  );
  str_attr!(
    /// Схема, которой принадлежит таблица или представление
    fn schema = ObjSchema
  );
  /// Список столбцов в порядке их объявления.
  pub fn columns(&self) -> Result<ListDescriptor<'p>> {
    self.0.attr_param(ParamAttr::ListColumns).map(ListDescriptor)
  }
}

//-------------------------------------------------------------------------------------------------
/// Описание столбца таблицы или представления.
#[derive(Clone, Copy, Debug)]
pub struct ColumnDescriptor<'p>(Param<'p>);
impl<'p> ColumnDescriptor<'p> {
  str_attr!(
    /// Имя столбца
    fn name = Name
  );
  /// Код типа данных. Тип, неизвестный библиотеке, возвращается как есть в [`data_type_code`][1].
  ///
  /// [1]: #method.data_type_code
  pub fn data_type(&self) -> Result<Option<Type>> {
    self.data_type_code().map(Type::from_code)
  }
  attr!(
    /// Код типа данных в том виде, в каком его вернул сервер
    fn data_type_code -> u16 = DataType
  );
  attr!(
    /// Максимальный размер данных в байтах
    fn length -> u16 = DataSize
  );
  attr!(
    /// Точность числа
    fn precision -> i16 = Precision
  );
  attr!(
    /// Количество цифр после десятичной точки
    fn scale -> i8 = Scale
  );
  attr!(
    /// Допускает ли столбец `NULL`-значения
    fn is_nullable -> bool = IsNull
  );
  /// Форма набора символов
  pub fn charset_form(&self) -> Result<CharsetForm> {
    let form: u8 = self.0.get_(ParamAttr::CharsetForm, self.0.error())?;
    Ok(CharsetForm::from_code(form).unwrap_or_default())
  }
  attr!(
    /// Идентификатор набора символов
    fn charset_id -> u16 = CharsetId
  );
  attr!(
    /// Используется ли символьная семантика длины
    fn char_used -> bool = CharUsed
  );
  attr!(
    /// Длина столбца в символах
    fn char_size -> u16 = CharSize
  );
  attr!(
    /// Является ли столбец невидимым (`INVISIBLE`)
    fn is_invisible -> bool = InvisibleCol
  );
  str_attr!(
    /// Имя пользовательского типа для столбцов объектных типов
    fn type_name = TypeName
  );
  str_attr!(
    /// Схема пользовательского типа для столбцов объектных типов
    fn schema_name = SchemaName
  );
}

//-------------------------------------------------------------------------------------------------
/// Описание схемы.
#[derive(Clone, Copy, Debug)]
pub struct SchemaDescriptor<'p>(Param<'p>);
impl<'p> SchemaDescriptor<'p> {
  str_attr!(
    /// Имя схемы
    fn name = SchemaName
  );
  /// Список объектов схемы
  pub fn object_list(&self) -> Result<ListDescriptor<'p>> {
    self.0.attr_param(ParamAttr::ListObjects).map(ListDescriptor)
  }
}
/// Описание базы данных.
#[derive(Clone, Copy, Debug)]
pub struct DatabaseDescriptor<'p>(Param<'p>);
impl<'p> DatabaseDescriptor<'p> {
  /// Список схем базы данных
  pub fn schema_list(&self) -> Result<ListDescriptor<'p>> {
    self.0.attr_param(ParamAttr::ListSchemas).map(ListDescriptor)
  }
}
