//! Граф объектов метаданных: схемы, таблицы и представления, их столбцы.
//!
//! Узлы графа строятся по дереву описания из модуля [`describe`][1] и после создания не изменяются. Каждый
//! узел заимствует своего владельца и соединение, через которое при необходимости выполняется повторное
//! описание. Чтобы получить актуальное состояние базы, граф нужно построить заново.
//!
//! [1]: ../describe/index.html

use std::fmt;

use crate::{Result, ServiceContext};
use crate::describe::{ColumnDescriptor, ParameterDescriptor, TableViewBaseDescriptor};
use crate::error::Error;
use crate::types::{CharsetForm, ParameterType, Type};

/// Узел графа метаданных.
pub trait MetadataObject {
  /// Имя объекта
  fn name(&self) -> &str;
  /// Объект, которому принадлежит данный. Для корневых объектов `None`
  fn owner(&self) -> Option<&dyn MetadataObject>;
  /// Соединение, в котором был получен объект
  fn service_context(&self) -> &ServiceContext;
}

//-------------------------------------------------------------------------------------------------
/// Схема базы данных.
pub struct Schema<'c> {
  conn: &'c ServiceContext<'c>,
  name: String,
}
impl<'c> Schema<'c> {
  /// Проверяет существование схемы и создает узел для нее.
  ///
  /// # Запросы к серверу (1)
  pub fn load(conn: &'c ServiceContext<'c>, name: &str) -> Result<Self> {
    let describe = conn.describe(name, ParameterType::Schema, false)?;
    match describe.parameter()? {
      ParameterDescriptor::Schema(s) => Ok(Schema { conn: conn, name: s.name()? }),
      other => Err(Error::WrongObjectType { name: name.to_owned(), ptype: other.ptype() }),
    }
  }
  /// Таблицы и представления схемы в том порядке, в каком их вернул сервер. Объекты других видов
  /// пропускаются.
  ///
  /// # Запросы к серверу (1)
  pub fn objects(&self) -> Result<Vec<TableOrView>> {
    // Имя схемы получено от сервера, поэтому регистр уже точный
    let describe = self.conn.describe(&self.name, ParameterType::Schema, true)?;
    let list = match describe.parameter()? {
      ParameterDescriptor::Schema(schema) => schema.object_list()?,
      other => return Err(Error::WrongObjectType { name: self.name.clone(), ptype: other.ptype() }),
    };
    let mut objects = Vec::new();
    for item in list.iter()? {
      let item = item?;
      let kind = match item.ptype() {
        Some(ParameterType::Table) => ParameterType::Table,
        Some(ParameterType::View) => ParameterType::View,
        _ => continue,
      };
      objects.push(TableOrView {
        conn: self.conn,
        owner: Some(self),
        name: item.object_name()?,
        schema_name: self.name.clone(),
        kind: kind,
      });
    }
    Ok(objects)
  }
}
impl<'c> MetadataObject for Schema<'c> {
  fn name(&self) -> &str {
    &self.name
  }
  fn owner(&self) -> Option<&dyn MetadataObject> {
    None
  }
  fn service_context(&self) -> &ServiceContext {
    self.conn
  }
}
impl<'c> fmt::Debug for Schema<'c> {
  fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
    fmt.debug_struct("Schema").field("name", &self.name).finish()
  }
}

//-------------------------------------------------------------------------------------------------
/// Таблица или представление.
pub struct TableOrView<'o> {
  conn: &'o ServiceContext<'o>,
  owner: Option<&'o Schema<'o>>,
  name: String,
  schema_name: String,
  kind: ParameterType,
}
impl<'o> TableOrView<'o> {
  /// Описывает таблицу или представление с указанным именем. Если указан владелец, имя ищется в его схеме.
  ///
  /// # Запросы к серверу (1)
  pub fn load(conn: &'o ServiceContext<'o>, owner: Option<&'o Schema<'o>>, name: &str) -> Result<Self> {
    let (full_name, described) = match owner {
      Some(schema) => (format!("{}.{}", schema.name, name), format!("\"{}\".{}", schema.name, name)),
      None => (name.to_owned(), name.to_owned()),
    };
    let describe = conn.describe(&described, ParameterType::Unknown, false)?;
    let (kind, desc) = match describe.parameter()? {
      ParameterDescriptor::Table(d) => (ParameterType::Table, d),
      ParameterDescriptor::View(d) => (ParameterType::View, d),
      other => return Err(Error::WrongObjectType { name: full_name, ptype: other.ptype() }),
    };
    Ok(TableOrView {
      conn: conn,
      owner: owner,
      name: desc.name()?,
      schema_name: desc.schema()?,
      kind: kind,
    })
  }
  /// Полное имя объекта вместе со схемой
  pub fn full_name(&self) -> String {
    if self.schema_name.is_empty() {
      return self.name.clone();
    }
    format!("{}.{}", self.schema_name, self.name)
  }
  /// Схема, в которой находится объект
  #[inline]
  pub fn schema_name(&self) -> &str {
    &self.schema_name
  }
  /// Вид объекта: [`Table`][1] или [`View`][2]
  ///
  /// [1]: ../types/enum.ParameterType.html#variant.Table
  /// [2]: ../types/enum.ParameterType.html#variant.View
  #[inline]
  pub fn kind(&self) -> ParameterType {
    self.kind
  }
  /// Заново описывает объект и строит его столбцы в порядке их объявления в таблице. Имена схемы и
  /// объекта передаются серверу в кавычках в том виде, в каком он их вернул.
  ///
  /// # Запросы к серверу (1)
  pub fn columns(&self) -> Result<Vec<Column>> {
    let full_name = self.full_name();
    let describe = self.conn.describe(&full_name, self.kind, true)?;
    let desc: TableViewBaseDescriptor = match describe.parameter()? {
      ParameterDescriptor::Table(d) | ParameterDescriptor::View(d) => d,
      other => return Err(Error::WrongObjectType { name: full_name, ptype: other.ptype() }),
    };
    let list = desc.columns()?;
    let mut columns = Vec::with_capacity(list.len()?);
    for item in list.iter()? {
      match item? {
        ParameterDescriptor::Column(c) => columns.push(Column::new(self, c)?),
        other => return Err(Error::WrongObjectType { name: full_name, ptype: other.ptype() }),
      }
    }
    Ok(columns)
  }
}
impl<'o> MetadataObject for TableOrView<'o> {
  fn name(&self) -> &str {
    &self.name
  }
  fn owner(&self) -> Option<&dyn MetadataObject> {
    self.owner.map(|s| s as &dyn MetadataObject)
  }
  fn service_context(&self) -> &ServiceContext {
    self.conn
  }
}
impl<'o> fmt::Debug for TableOrView<'o> {
  fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
    fmt.debug_struct("TableOrView")
       .field("schema", &self.schema_name)
       .field("name", &self.name)
       .field("kind", &self.kind)
       .finish()
  }
}

//-------------------------------------------------------------------------------------------------
/// Столбец таблицы или представления. В отличие от [`stmt::Column`][1], описывает столбец объекта
/// базы данных, а не списка выбора запроса.
///
/// [1]: ../stmt/struct.Column.html
pub struct Column<'t> {
  owner: &'t TableOrView<'t>,
  name: String,
  data_type: u16,
  length: u16,
  precision: i16,
  scale: i8,
  nullable: bool,
  charset_form: CharsetForm,
  char_used: bool,
  char_size: u16,
  invisible: bool,
  type_name: String,
}
impl<'t> Column<'t> {
  fn new(owner: &'t TableOrView<'t>, desc: ColumnDescriptor) -> Result<Self> {
    Ok(Column {
      owner: owner,
      name: desc.name()?,
      data_type: desc.data_type_code()?,
      length: desc.length()?,
      precision: desc.precision()?,
      scale: desc.scale()?,
      nullable: desc.is_nullable()?,
      charset_form: desc.charset_form()?,
      char_used: desc.char_used()?,
      char_size: desc.char_size()?,
      invisible: desc.is_invisible()?,
      type_name: desc.type_name()?,
    })
  }
  /// Таблица или представление, которому принадлежит столбец
  #[inline]
  pub fn table(&self) -> &'t TableOrView<'t> {
    self.owner
  }
  /// Тип данных столбца, если он известен библиотеке
  #[inline]
  pub fn data_type(&self) -> Option<Type> {
    Type::from_code(self.data_type)
  }
  /// Код типа данных столбца в том виде, в каком его вернул сервер
  #[inline]
  pub fn data_type_code(&self) -> u16 {
    self.data_type
  }
  /// Максимальный размер данных в байтах
  #[inline]
  pub fn length(&self) -> u16 {
    self.length
  }
  /// Точность числа
  #[inline]
  pub fn precision(&self) -> i16 {
    self.precision
  }
  /// Количество цифр после десятичной точки
  #[inline]
  pub fn scale(&self) -> i8 {
    self.scale
  }
  /// Допускает ли столбец `NULL`-значения
  #[inline]
  pub fn nullable(&self) -> bool {
    self.nullable
  }
  /// Форма набора символов
  #[inline]
  pub fn charset_form(&self) -> CharsetForm {
    self.charset_form
  }
  /// Используется ли символьная семантика длины
  #[inline]
  pub fn char_used(&self) -> bool {
    self.char_used
  }
  /// Длина в символах
  #[inline]
  pub fn char_size(&self) -> u16 {
    self.char_size
  }
  /// Является ли столбец невидимым
  #[inline]
  pub fn invisible(&self) -> bool {
    self.invisible
  }
  /// Имя пользовательского типа для столбцов объектных типов
  #[inline]
  pub fn type_name(&self) -> &str {
    &self.type_name
  }
}
impl<'t> MetadataObject for Column<'t> {
  fn name(&self) -> &str {
    &self.name
  }
  fn owner(&self) -> Option<&dyn MetadataObject> {
    Some(self.owner as &dyn MetadataObject)
  }
  fn service_context(&self) -> &ServiceContext {
    self.owner.conn
  }
}
impl<'t> fmt::Debug for Column<'t> {
  fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
    fmt.debug_struct("Column")
       .field("name", &self.name)
       .field("data_type", &self.data_type)
       .field("length", &self.length)
       .field("nullable", &self.nullable)
       .finish()
  }
}
