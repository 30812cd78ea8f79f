//! Заменитель клиентской библиотеки Oracle для тестов. Хранит небольшую базу в памяти, понимает несколько
//! видов запросов (`select`, `insert`, `delete`), считает нативные вызовы и позволяет подсунуть ошибку в любой
//! из них.
//!
//! Хендлы, дескрипторы и параметры представлены уникальными числами, которые никогда не разыменовываются.

use std::collections::{BTreeMap, HashMap};
use std::os::raw::{c_int, c_uchar, c_uint, c_ushort, c_void};
use std::ptr;
use std::slice;
use std::sync::{Arc, Mutex, MutexGuard};

use oci::ffi::{Oci, OCIBind, OCIDefine, OCIDescribe, OCIEnv, OCIError, OCIRowid, OCIServer, OCISession, OCIStmt, OCISvcCtx, OCIType};
use oci::ffi::types::{execute_mode, status, Attr, CredentialMode, ParamAttr};
use oci::types::{DescriptorType, HandleType, ParameterType, StatementType, Type};

/// Код и текст ошибки, которые будут выданы через `OCIErrorGet()`.
type Fault = (i32, String);

fn ora<S: Into<String>>(code: i32, text: S) -> Fault {
  (code, format!("ORA-{:05}: {}", code, text.into()))
}

const STMT_TYPE: c_uint = Attr::StmtType as c_uint;
const ROW_COUNT: c_uint = Attr::RowCount as c_uint;
const PARAM_COUNT: c_uint = Attr::ParamCount as c_uint;
const ROW_ID: c_uint = Attr::RowId as c_uint;
const USERNAME: c_uint = Attr::Username as c_uint;
const PASSWORD: c_uint = Attr::Password as c_uint;
const PARAM: c_uint = Attr::Param as c_uint;
const ROWS_FETCHED: c_uint = Attr::RowsFetched as c_uint;
const PREFETCH_ROWS: c_uint = Attr::PrefetchRows as c_uint;

const DATA_SIZE: c_uint = ParamAttr::DataSize as c_uint;
const DATA_TYPE: c_uint = ParamAttr::DataType as c_uint;
const NAME: c_uint = ParamAttr::Name as c_uint;
const PRECISION: c_uint = ParamAttr::Precision as c_uint;
const SCALE: c_uint = ParamAttr::Scale as c_uint;
const IS_NULL: c_uint = ParamAttr::IsNull as c_uint;
const TYPE_NAME: c_uint = ParamAttr::TypeName as c_uint;
const SCHEMA_NAME: c_uint = ParamAttr::SchemaName as c_uint;
const CHARSET_ID: c_uint = ParamAttr::CharsetId as c_uint;
const CHARSET_FORM: c_uint = ParamAttr::CharsetForm as c_uint;
const NUM_COLS: c_uint = ParamAttr::NumCols as c_uint;
const LIST_COLUMNS: c_uint = ParamAttr::ListColumns as c_uint;
const NUM_PARAMS: c_uint = ParamAttr::NumParams as c_uint;
const PTYPE: c_uint = ParamAttr::Ptype as c_uint;
const OBJ_NAME: c_uint = ParamAttr::ObjName as c_uint;
const OBJ_SCHEMA: c_uint = ParamAttr::ObjSchema as c_uint;
const OBJ_ID: c_uint = ParamAttr::ObjId as c_uint;
const LIST_OBJECTS: c_uint = ParamAttr::ListObjects as c_uint;
const LIST_SCHEMAS: c_uint = ParamAttr::ListSchemas as c_uint;
const CHAR_USED: c_uint = ParamAttr::CharUsed as c_uint;
const CHAR_SIZE: c_uint = ParamAttr::CharSize as c_uint;
const INVISIBLE: c_uint = ParamAttr::InvisibleCol as c_uint;

//-------------------------------------------------------------------------------------------------
/// Значение в ячейке таблицы тестовой базы.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
  Null,
  Int(i64),
  UInt(u64),
  Float(f64),
  Text(String),
  Raw(Vec<u8>),
  /// Дата во внутреннем 7-байтовом формате
  Date([u8; 7]),
  /// Экземпляр пользовательского типа, содержимое не моделируется
  Object,
}
impl Cell {
  pub fn text(s: &str) -> Cell {
    Cell::Text(s.to_owned())
  }
  fn as_i64(&self) -> Result<i64, Fault> {
    match *self {
      Cell::Int(v) => Ok(v),
      Cell::UInt(v) => Ok(v as i64),
      Cell::Float(v) => Ok(v as i64),
      Cell::Text(ref s) => s.trim().parse().map_err(|_| ora(1722, "invalid number")),
      _ => Err(ora(932, "inconsistent datatypes")),
    }
  }
  fn as_f64(&self) -> Result<f64, Fault> {
    match *self {
      Cell::Int(v) => Ok(v as f64),
      Cell::UInt(v) => Ok(v as f64),
      Cell::Float(v) => Ok(v),
      Cell::Text(ref s) => s.trim().parse().map_err(|_| ora(1722, "invalid number")),
      _ => Err(ora(932, "inconsistent datatypes")),
    }
  }
  fn as_text(&self) -> String {
    match *self {
      Cell::Int(v) => v.to_string(),
      Cell::UInt(v) => v.to_string(),
      Cell::Float(v) => v.to_string(),
      Cell::Text(ref s) => s.clone(),
      Cell::Raw(ref b) => b.iter().map(|b| format!("{:02X}", b)).collect(),
      _ => String::new(),
    }
  }
  /// Сравнение в условии `where`: числа сравниваются как числа, `NULL` не равен ничему.
  fn matches(&self, other: &Cell) -> bool {
    match (self, other) {
      (&Cell::Null, _) | (_, &Cell::Null) => false,
      (&Cell::Text(ref a), &Cell::Text(ref b)) => a == b,
      (a, b) => match (a.as_f64(), b.as_f64()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
      },
    }
  }
  /// Раскодирует значение связанной переменной из буфера.
  fn decode(dty: u16, data: &[u8]) -> Cell {
    let mut buf = [0u8; 8];
    let n = data.len().min(8);
    buf[..n].copy_from_slice(&data[..n]);
    match (Type::from_code(dty), data.len()) {
      (Some(Type::INT), 1) => Cell::Int(data[0] as i8 as i64),
      (Some(Type::INT), 2) => Cell::Int(i16::from_ne_bytes([buf[0], buf[1]]) as i64),
      (Some(Type::INT), 4) => Cell::Int(i32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]]) as i64),
      (Some(Type::INT), 8) => Cell::Int(i64::from_ne_bytes(buf)),
      (Some(Type::UIN), 1) => Cell::UInt(data[0] as u64),
      (Some(Type::UIN), 2) => Cell::UInt(u16::from_ne_bytes([buf[0], buf[1]]) as u64),
      (Some(Type::UIN), 4) => Cell::UInt(u32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]]) as u64),
      (Some(Type::UIN), 8) => Cell::UInt(u64::from_ne_bytes(buf)),
      (Some(Type::BFLOAT), 4) => Cell::Float(f32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]]) as f64),
      (Some(Type::BDOUBLE), 8) => Cell::Float(f64::from_ne_bytes(buf)),
      (Some(Type::CHR), _) | (Some(Type::AFC), _) |
      (Some(Type::STR), _) | (Some(Type::VCS), _) => Cell::Text(String::from_utf8_lossy(data).into_owned()),
      (Some(Type::BIN), _) | (Some(Type::LBI), _) | (Some(Type::VBI), _) => Cell::Raw(data.to_vec()),
      (Some(Type::DAT), 7) => {
        let mut d = [0u8; 7];
        d.copy_from_slice(data);
        Cell::Date(d)
      },
      _ => Cell::Null,
    }
  }
  /// Кодирует значение во внешний тип буфера столбца.
  fn encode(&self, dty: u16, size: usize) -> Result<Vec<u8>, Fault> {
    Ok(match Type::from_code(dty) {
      Some(Type::INT) => {
        let v = self.as_i64()?;
        match size {
          1 => (v as i8).to_ne_bytes().to_vec(),
          2 => (v as i16).to_ne_bytes().to_vec(),
          4 => (v as i32).to_ne_bytes().to_vec(),
          _ => v.to_ne_bytes().to_vec(),
        }
      },
      Some(Type::UIN) => {
        let v = match *self {
          Cell::UInt(v) => v,
          ref other => other.as_i64()? as u64,
        };
        match size {
          1 => (v as u8).to_ne_bytes().to_vec(),
          2 => (v as u16).to_ne_bytes().to_vec(),
          4 => (v as u32).to_ne_bytes().to_vec(),
          _ => v.to_ne_bytes().to_vec(),
        }
      },
      Some(Type::BFLOAT) => (self.as_f64()? as f32).to_ne_bytes().to_vec(),
      Some(Type::BDOUBLE) => self.as_f64()?.to_ne_bytes().to_vec(),
      Some(Type::CHR) => self.as_text().into_bytes(),
      Some(Type::BIN) => match *self {
        Cell::Raw(ref b) => b.clone(),
        ref other => other.as_text().into_bytes(),
      },
      Some(Type::DAT) => match *self {
        Cell::Date(ref d) => d.to_vec(),
        _ => return Err(ora(932, "inconsistent datatypes")),
      },
      _ => return Err(ora(932, "inconsistent datatypes")),
    })
  }
}

/// Описание столбца таблицы или списка выбора.
#[derive(Clone, Debug)]
pub struct ColumnDef {
  pub name: String,
  pub data_type: u16,
  pub size: u16,
  pub precision: i16,
  pub scale: i8,
  pub nullable: bool,
  pub char_used: bool,
  pub char_size: u16,
  pub charset_form: u8,
  pub invisible: bool,
  pub type_name: String,
  pub schema_name: String,
}
impl ColumnDef {
  fn new(name: &str, ty: Type, size: u16) -> Self {
    ColumnDef {
      name: name.to_owned(),
      data_type: ty.code(),
      size: size,
      precision: 0,
      scale: 0,
      nullable: true,
      char_used: false,
      char_size: 0,
      charset_form: 0,
      invisible: false,
      type_name: String::new(),
      schema_name: String::new(),
    }
  }
  /// `NUMBER(precision, scale)`. `NUMBER` без точности описывается как `(0, -127)`.
  pub fn number(name: &str, precision: i16, scale: i8) -> Self {
    ColumnDef { precision: precision, scale: scale, ..ColumnDef::new(name, Type::NUM, 22) }
  }
  /// `VARCHAR2(size)`
  pub fn varchar(name: &str, size: u16) -> Self {
    ColumnDef { char_size: size, charset_form: 1, ..ColumnDef::new(name, Type::CHR, size) }
  }
  pub fn date(name: &str) -> Self {
    ColumnDef::new(name, Type::DAT, 7)
  }
  /// Столбец пользовательского типа `schema.type_name`
  pub fn object(name: &str, schema: &str, type_name: &str) -> Self {
    ColumnDef {
      type_name: type_name.to_owned(),
      schema_name: schema.to_owned(),
      ..ColumnDef::new(name, Type::NTY, 0)
    }
  }
  fn rowid() -> Self {
    ColumnDef::new("ROWID", Type::RID, 10)
  }
  pub fn not_null(self) -> Self {
    ColumnDef { nullable: false, ..self }
  }
  pub fn invisible(self) -> Self {
    ColumnDef { invisible: true, ..self }
  }
}

/// Таблица или представление тестовой базы.
#[derive(Clone, Debug)]
pub struct Table {
  pub schema: String,
  pub name: String,
  pub view: bool,
  pub columns: Vec<ColumnDef>,
  pub rows: Vec<Vec<Cell>>,
}
impl Table {
  pub fn new(name: &str, columns: Vec<ColumnDef>) -> Self {
    Table { schema: "SCOTT".into(), name: name.into(), view: false, columns: columns, rows: Vec::new() }
  }
}

/// Содержимое тестовой базы.
#[derive(Clone, Debug, Default)]
pub struct Database {
  /// Пары пользователь/пароль, с которыми разрешен вход
  pub users: Vec<(String, String)>,
  /// Схемы базы. Первая схема является схемой по умолчанию
  pub schemas: Vec<String>,
  pub tables: Vec<Table>,
  /// Синонимы: схема и имя
  pub synonyms: Vec<(String, String)>,
  /// Пользовательские типы: схема и имя
  pub types: Vec<(String, String)>,
}
impl Database {
  /// База со схемой `SCOTT`, в которой есть несколько таблиц с данными, представление, синоним и
  /// объектный тип, и пустой схемой `HR`.
  pub fn sample() -> Self {
    let mut emp = Table::new("EMP", vec![
      ColumnDef::number("EMPNO", 4, 0).not_null(),
      ColumnDef::varchar("ENAME", 10),
      ColumnDef::number("DEPTNO", 2, 0),
    ]);
    emp.rows = vec![
      vec![Cell::Int(7369), Cell::text("SMITH"), Cell::Int(20)],
      vec![Cell::Int(7782), Cell::text("CLARK"), Cell::Int(10)],
      vec![Cell::Int(7839), Cell::text("KING"), Cell::Int(10)],
      vec![Cell::Int(7934), Cell::Null, Cell::Int(10)],
    ];
    let t = Table::new("T", vec![
      ColumnDef::number("ID", 0, -127),
      ColumnDef::varchar("NAME", 50),
    ]);
    // Порядок столбцов не совпадает с алфавитным
    let mixed = Table::new("MIXED", vec![
      ColumnDef::varchar("C", 1),
      ColumnDef::number("A", 5, 0),
      ColumnDef::date("B").invisible(),
    ]);
    let emp_v = Table {
      view: true,
      ..Table::new("EMP_V", vec![
        ColumnDef::number("EMPNO", 4, 0).not_null(),
        ColumnDef::varchar("ENAME", 10),
      ])
    };
    let mut shapes = Table::new("SHAPES", vec![
      ColumnDef::number("ID", 9, 0).not_null(),
      ColumnDef::object("GEO", "SCOTT", "POINT"),
    ]);
    shapes.rows = vec![
      vec![Cell::Int(1), Cell::Object],
      vec![Cell::Int(2), Cell::Null],
    ];
    let mut notes = Table::new("NOTES", vec![ColumnDef::varchar("TXT", 4)]);
    notes.rows = vec![vec![Cell::text("overflow")]];

    Database {
      users: vec![("scott".into(), "tiger".into())],
      schemas: vec!["SCOTT".into(), "HR".into()],
      tables: vec![emp, t, mixed, emp_v, shapes, notes],
      synonyms: vec![("SCOTT".into(), "E".into())],
      types: vec![("SCOTT".into(), "POINT".into())],
    }
  }
  fn default_schema(&self) -> String {
    self.schemas.first().cloned().unwrap_or_default()
  }
  /// Ищет таблицу по имени, возможно, с указанием схемы через точку. Имена без кавычек приводятся к верхнему регистру.
  fn find(&self, name: &str) -> Option<usize> {
    let parts: Vec<String> = name.split('.').map(unquote).collect();
    let (schema, name) = match parts.len() {
      1 => (self.default_schema(), parts[0].clone()),
      2 => (parts[0].clone(), parts[1].clone()),
      _ => return None,
    };
    self.tables.iter().position(|t| t.schema == schema && t.name == name)
  }
}

fn unquote(part: &str) -> String {
  let part = part.trim();
  if part.len() >= 2 && part.starts_with('"') && part.ends_with('"') {
    part[1..part.len() - 1].to_owned()
  } else {
    part.to_uppercase()
  }
}
fn rowid(table: usize, row: usize) -> String {
  format!("AAAR{:02}AAEAAAAC{:04}", table, row)
}

//-------------------------------------------------------------------------------------------------
// Разбор запросов
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
#[derive(Clone, Debug, PartialEq)]
enum Item {
  /// Порядковый номер переменной в запросе (с 1) и ее имя
  Bind(usize, String),
  Count,
  RowId,
  Column(String),
  Number(i64),
  Text(String),
  Null,
}
#[derive(Clone, Debug)]
enum Command {
  Select { items: Vec<Item>, table: String, filter: Option<(String, Item)> },
  Insert { table: String, columns: Vec<String>, values: Vec<Item> },
  Delete { table: String },
  /// PL/SQL блок из присваиваний вида `:r := выражение;`. Части выражения, разделенные `||`, склеиваются как строки
  Block { assignments: Vec<(Item, Vec<Item>)> },
  Other,
}

/// Имена переменных в порядке их появления в запросе, в нижнем регистре и без двоеточия.
fn placeholders(sql: &str) -> Vec<String> {
  let mut result = Vec::new();
  let mut quoted = false;
  for (i, c) in sql.char_indices() {
    match c {
      '\'' => quoted = !quoted,
      ':' if !quoted => {
        let name: String = sql[i + 1..].chars().take_while(|c| c.is_alphanumeric() || *c == '_').collect();
        if !name.is_empty() {
          result.push(name.to_lowercase());
        }
      },
      _ => {},
    }
  }
  result
}
fn split_list(list: &str) -> Vec<&str> {
  list.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}
fn item(text: &str, ordinal: &mut usize) -> Item {
  let t = text.trim();
  if t.starts_with(':') {
    *ordinal += 1;
    return Item::Bind(*ordinal, t[1..].to_lowercase());
  }
  if t.eq_ignore_ascii_case("count(*)") {
    return Item::Count;
  }
  if t.eq_ignore_ascii_case("rowid") {
    return Item::RowId;
  }
  if t.eq_ignore_ascii_case("null") {
    return Item::Null;
  }
  if t.len() >= 2 && t.starts_with('\'') && t.ends_with('\'') {
    return Item::Text(t[1..t.len() - 1].to_owned());
  }
  match t.parse() {
    Ok(n) => Item::Number(n),
    Err(_) => Item::Column(unquote(t)),
  }
}
fn parse(sql: &str) -> Command {
  let sql = sql.trim().trim_end_matches(';');
  let lower = sql.to_ascii_lowercase();
  let mut ordinal = 0;
  if lower.starts_with("select ") {
    let from = match lower.find(" from ") {
      Some(pos) => pos,
      None => return Command::Other,
    };
    let items = split_list(&sql[7..from]).into_iter().map(|t| item(t, &mut ordinal)).collect();
    let rest = &sql[from + 6..];
    let (table, filter) = match lower[from + 6..].find(" where ") {
      Some(pos) => (&rest[..pos], Some(&rest[pos + 7..])),
      None => (rest, None),
    };
    let filter = filter.and_then(|f| {
      let mut parts = f.splitn(2, '=');
      let column = unquote(parts.next()?);
      let value = item(parts.next()?, &mut ordinal);
      Some((column, value))
    });
    return Command::Select { items: items, table: table.trim().to_owned(), filter: filter };
  }
  if lower.starts_with("insert into ") {
    let values = match lower.find("values") {
      Some(pos) => pos,
      None => return Command::Other,
    };
    let head = sql[12..values].trim();
    let (table, columns) = match head.find('(') {
      Some(pos) => (&head[..pos], split_list(head[pos + 1..].trim_end_matches(')')).into_iter().map(unquote).collect()),
      None => (head, Vec::new()),
    };
    let body = sql[values + 6..].trim().trim_start_matches('(').trim_end_matches(')');
    let values = split_list(body).into_iter().map(|t| item(t, &mut ordinal)).collect();
    return Command::Insert { table: table.trim().to_owned(), columns: columns, values: values };
  }
  if lower.starts_with("begin") {
    let end = lower.rfind("end").unwrap_or(lower.len());
    let mut assignments = Vec::new();
    for statement in sql[5..end].split(';') {
      let mut parts = statement.splitn(2, ":=");
      let (target, value) = match (parts.next(), parts.next()) {
        (Some(t), Some(v)) => (t, v),
        _ => continue,
      };
      let target = item(target, &mut ordinal);
      let value = value.split("||").map(|t| item(t, &mut ordinal)).collect();
      assignments.push((target, value));
    }
    return Command::Block { assignments: assignments };
  }
  if lower.starts_with("delete from ") {
    let table = sql[12..].split_whitespace().next().unwrap_or("");
    return Command::Delete { table: table.to_owned() };
  }
  Command::Other
}
fn statement_type(sql: &str) -> StatementType {
  let lower = sql.trim().to_ascii_lowercase();
  let word = lower.split_whitespace().next().unwrap_or("");
  match word {
    "select" | "with" => StatementType::SELECT,
    "update" => StatementType::UPDATE,
    "delete" => StatementType::DELETE,
    "insert" => StatementType::INSERT,
    "create" => StatementType::CREATE,
    "drop" => StatementType::DROP,
    "alter" => StatementType::ALTER,
    "begin" => StatementType::BEGIN,
    "declare" => StatementType::DECLARE,
    "call" => StatementType::CALL,
    "merge" => StatementType::MERGE,
    _ => StatementType::UNKNOWN,
  }
}

//-------------------------------------------------------------------------------------------------
// Выражения
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
#[derive(Clone, Debug, PartialEq)]
enum BindKey {
  Pos(u32),
  Name(String),
}
/// Адреса буферов, переданные в `OCIBindByPos2()`/`OCIBindByName2()`.
#[derive(Clone, Debug)]
struct BindEntry {
  key: BindKey,
  valuep: usize,
  value_sz: i64,
  dty: u16,
  indp: usize,
  alenp: usize,
  rcodep: usize,
}
impl BindEntry {
  /// Читает значение для итерации `iter`. Скалярные связывания (без массива длин) дают одно и то же
  /// значение на всех итерациях.
  unsafe fn read(&self, iter: usize) -> Cell {
    let row = if self.alenp != 0 { iter } else { 0 };
    if self.indp != 0 && *(self.indp as *const i16).add(row) == -1 {
      return Cell::Null;
    }
    if self.valuep == 0 {
      return Cell::Null;
    }
    let len = if self.alenp != 0 { *(self.alenp as *const u32).add(row) as usize } else { self.value_sz as usize };
    let data = slice::from_raw_parts((self.valuep as *const u8).add(row * self.value_sz as usize), len);
    Cell::decode(self.dty, data)
  }
  /// Записывает выходное значение PL/SQL блока. Слишком длинное значение усекается по размеру буфера,
  /// а код возврата получает `1406`.
  unsafe fn write(&self, value: &Cell) -> Result<(), Fault> {
    if *value == Cell::Null {
      set(self.indp, -1i16);
      set(self.alenp, 0u32);
      return Ok(());
    }
    let data = value.encode(self.dty, self.value_sz as usize)?;
    let size = (self.value_sz as usize).min(data.len());
    if size > 0 {
      ptr::copy_nonoverlapping(data.as_ptr(), self.valuep as *mut u8, size);
    }
    set(self.indp, 0i16);
    set(self.alenp, size as u32);
    if size < data.len() {
      set(self.rcodep, 1406u16);
      return Err(ora(6502, "PL/SQL: numeric or value error: character string buffer too small"));
    }
    set(self.rcodep, 0u16);
    Ok(())
  }
  /// Описание столбца списка выбора, значением которого является данная переменная.
  fn describe(&self, name: &str) -> ColumnDef {
    let ty = Type::from_code(self.dty).unwrap_or(Type::CHR);
    let size = self.value_sz.max(1) as u16;
    let mut column = ColumnDef::new(&format!(":{}", name.to_uppercase()), ty, size);
    if ty == Type::CHR {
      column.charset_form = 1;
      column.char_size = size;
    }
    column
  }
}
/// Адреса буферов, переданные в `OCIDefineByPos2()`.
#[derive(Clone, Copy, Debug)]
struct DefineEntry {
  handle: usize,
  valuep: usize,
  value_sz: i64,
  dty: u16,
  indp: usize,
  rlenp: usize,
  rcodep: usize,
}

#[derive(Debug)]
struct Stmt {
  command: Command,
  kind: StatementType,
  placeholders: Vec<String>,
  binds: Vec<BindEntry>,
  defines: BTreeMap<u32, DefineEntry>,
  /// Список выбора, полученный при последнем выполнении
  columns: Vec<ColumnDef>,
  /// Дескрипторы параметров столбцов списка выбора
  params: Vec<usize>,
  rows: Vec<Vec<Cell>>,
  cursor: usize,
  fetchable: bool,
  row_count: u32,
  last_rowid: Option<String>,
  prefetch: u32,
}
impl Stmt {
  fn new(sql: &str) -> Self {
    Stmt {
      command: parse(sql),
      kind: statement_type(sql),
      placeholders: placeholders(sql),
      binds: Vec::new(),
      defines: BTreeMap::new(),
      columns: Vec::new(),
      params: Vec::new(),
      rows: Vec::new(),
      cursor: 0,
      fetchable: false,
      row_count: 0,
      last_rowid: None,
      prefetch: 1,
    }
  }
  /// Переменная ищется сначала по имени, затем по позиции.
  fn bound(&self, ordinal: usize, name: &str) -> Result<&BindEntry, Fault> {
    let by_name = BindKey::Name(name.to_owned());
    let by_pos = BindKey::Pos(ordinal as u32);
    self.binds.iter().find(|b| b.key == by_name)
      .or_else(|| self.binds.iter().find(|b| b.key == by_pos))
      .ok_or_else(|| ora(1008, "not all variables bound"))
  }
  fn bind(&mut self, entry: BindEntry) {
    match self.binds.iter_mut().find(|b| b.key == entry.key) {
      Some(b) => *b = entry,
      None => self.binds.push(entry),
    }
  }
  /// Выполняет присваивания PL/SQL блока по порядку.
  unsafe fn run(&self, assignments: &[(Item, Vec<Item>)]) -> Result<(), Fault> {
    for &(ref target, ref parts) in assignments {
      let value = if parts.len() == 1 {
        self.eval(&parts[0], 0)?
      } else {
        let mut text = String::new();
        for part in parts {
          text.push_str(&self.eval(part, 0)?.as_text());
        }
        Cell::Text(text)
      };
      match *target {
        Item::Bind(ordinal, ref name) => self.bound(ordinal, name)?.write(&value)?,
        _ => return Err(ora(6550, "PLS-00363: expression cannot be used as an assignment target")),
      }
    }
    Ok(())
  }
  /// Вычисляет значение, не зависящее от строки таблицы.
  unsafe fn eval(&self, item: &Item, iter: usize) -> Result<Cell, Fault> {
    match *item {
      Item::Bind(ordinal, ref name) => Ok(self.bound(ordinal, name)?.read(iter)),
      Item::Number(n) => Ok(Cell::Int(n)),
      Item::Text(ref t) => Ok(Cell::Text(t.clone())),
      Item::Null => Ok(Cell::Null),
      _ => Err(ora(984, "column not allowed here")),
    }
  }
}

//-------------------------------------------------------------------------------------------------
// Дерево описания
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
#[derive(Clone, Debug)]
enum Node {
  Column(ColumnDef),
  Table { schema: String, name: String, view: bool, id: u32, ncols: u16, columns: usize },
  List(Vec<usize>),
  Schema { name: String, objects: usize },
  Database { schemas: usize },
  Other { ptype: u8, name: String },
}
impl Node {
  fn ptype(&self) -> u8 {
    match *self {
      Node::Column(_) => ParameterType::Column.code(),
      Node::Table { view: false, .. } => ParameterType::Table.code(),
      Node::Table { view: true, .. } => ParameterType::View.code(),
      Node::List(_) => ParameterType::List.code(),
      Node::Schema { .. } => ParameterType::Schema.code(),
      Node::Database { .. } => ParameterType::Database.code(),
      Node::Other { ptype, .. } => ptype,
    }
  }
}

unsafe fn put<T>(p: *mut c_void, value: T) {
  *(p as *mut T) = value;
}
/// Строка остается во владении состояния, наружу отдается только указатель на нее.
unsafe fn put_str(p: *mut c_void, sizep: *mut c_uint, value: &str) {
  *(p as *mut *const u8) = value.as_ptr();
  if !sizep.is_null() {
    *sizep = value.len() as c_uint;
  }
}
unsafe fn set<T>(p: usize, value: T) {
  if p != 0 {
    *(p as *mut T) = value;
  }
}

//-------------------------------------------------------------------------------------------------
#[derive(Debug)]
enum Injected {
  Error(Vec<Fault>),
  Info(Vec<Fault>),
}

#[derive(Debug, Default)]
struct State {
  db: Database,
  next: usize,
  /// Живые хендлы и их виды
  handles: HashMap<usize, u32>,
  /// Живые дескрипторы и их виды
  descriptors: HashMap<usize, u32>,
  /// Размеры массивов дескрипторов по первому элементу
  arrays: HashMap<usize, usize>,
  /// Содержимое дескрипторов `ROWID`
  rowids: HashMap<usize, String>,
  diagnostics: HashMap<usize, Vec<Fault>>,
  /// Имя пользователя и пароль, установленные хендлу сессии
  logins: HashMap<usize, (String, String)>,
  stmts: HashMap<usize, Stmt>,
  describes: HashMap<usize, usize>,
  nodes: HashMap<usize, Node>,
  /// Адреса указателей на экземпляр и структуру индикаторов по хендлу определения
  objects: HashMap<usize, (usize, usize)>,
  calls: HashMap<&'static str, usize>,
  /// Виды освобожденных дескрипторов, по одному на дескриптор
  freed: Vec<u32>,
  injected: HashMap<&'static str, Injected>,
}
impl State {
  fn next_id(&mut self) -> usize {
    self.next += 0x10;
    self.next
  }
  fn alloc_handle(&mut self, kind: u32) -> usize {
    let id = self.next_id();
    self.handles.insert(id, kind);
    id
  }
  fn alloc_descriptor(&mut self, kind: u32) -> usize {
    let id = self.next_id();
    self.descriptors.insert(id, kind);
    id
  }
  fn add_node(&mut self, node: Node) -> usize {
    let id = self.next_id();
    self.nodes.insert(id, node);
    id
  }
  /// Записывает диагностику в хендл и возвращает код ошибки.
  fn fail(&mut self, handle: usize, fault: Fault) -> c_int {
    self.diagnostics.insert(handle, vec![fault]);
    status::ERROR
  }
  /// Отмечает вызов и, если для функции подготовлена ошибка, возвращает ее код.
  fn enter(&mut self, func: &'static str, handle: usize) -> Option<c_int> {
    *self.calls.entry(func).or_insert(0) += 1;
    match self.injected.remove(func) {
      Some(Injected::Error(records)) => {
        self.diagnostics.insert(handle, records);
        Some(status::ERROR)
      },
      Some(Injected::Info(records)) => {
        self.diagnostics.insert(handle, records);
        Some(status::SUCCESS_WITH_INFO)
      },
      None => None,
    }
  }

  fn table_node(&mut self, index: usize) -> usize {
    let t = self.db.tables[index].clone();
    let columns = t.columns.iter().map(|c| self.add_node(Node::Column(c.clone()))).collect();
    let list = self.add_node(Node::List(columns));
    self.add_node(Node::Table {
      schema: t.schema,
      name: t.name,
      view: t.view,
      id: 70000 + index as u32,
      ncols: t.columns.len() as u16,
      columns: list,
    })
  }
  fn schema_node(&mut self, name: &str) -> usize {
    let tables: Vec<usize> = (0..self.db.tables.len()).filter(|&i| self.db.tables[i].schema == name).collect();
    let synonyms: Vec<String> = self.db.synonyms.iter().filter(|s| s.0 == name).map(|s| s.1.clone()).collect();
    let mut objects: Vec<usize> = tables.into_iter().map(|i| self.table_node(i)).collect();
    for synonym in synonyms {
      objects.push(self.add_node(Node::Other { ptype: ParameterType::Synonym.code(), name: synonym }));
    }
    let list = self.add_node(Node::List(objects));
    self.add_node(Node::Schema { name: name.to_owned(), objects: list })
  }
  fn database_node(&mut self) -> usize {
    let names = self.db.schemas.clone();
    let schemas = names.iter().map(|s| self.schema_node(s)).collect();
    let list = self.add_node(Node::List(schemas));
    self.add_node(Node::Database { schemas: list })
  }
  fn describe(&mut self, name: &str, objtyp: u8) -> Result<usize, Fault> {
    let missing = || ora(4043, format!("object {} does not exist", name));
    let kind = ParameterType::from_code(objtyp).ok_or_else(|| ora(24371, "invalid object type"))?;
    if kind == ParameterType::Database {
      return Ok(self.database_node());
    }
    let parts: Vec<String> = name.split('.').map(unquote).collect();
    if kind == ParameterType::Schema {
      if parts.len() == 1 && self.db.schemas.contains(&parts[0]) {
        return Ok(self.schema_node(&parts[0]));
      }
      return Err(missing());
    }
    let (schema, object) = match parts.len() {
      1 => (self.db.default_schema(), parts[0].clone()),
      2 => (parts[0].clone(), parts[1].clone()),
      _ => return Err(missing()),
    };
    if let Some(i) = self.db.tables.iter().position(|t| t.schema == schema && t.name == object) {
      let view = self.db.tables[i].view;
      let accepted = match kind {
        ParameterType::Unknown => true,
        ParameterType::Table => !view,
        ParameterType::View => view,
        _ => false,
      };
      if !accepted {
        return Err(missing());
      }
      return Ok(self.table_node(i));
    }
    let synonym = self.db.synonyms.iter().any(|s| s.0 == schema && s.1 == object);
    if synonym && (kind == ParameterType::Unknown || kind == ParameterType::Synonym) {
      return Ok(self.add_node(Node::Other { ptype: ParameterType::Synonym.code(), name: object }));
    }
    if kind == ParameterType::Unknown && parts.len() == 1 && self.db.schemas.contains(&parts[0]) {
      return Ok(self.schema_node(&parts[0]));
    }
    Err(missing())
  }

  unsafe fn stmt_attr(&mut self, id: usize, attr: c_uint, p: *mut c_void) -> Result<(), Fault> {
    let stmt = self.stmts.get(&id).ok_or_else(|| ora(1001, "invalid cursor"))?;
    match attr {
      STMT_TYPE => put(p, stmt.kind.code()),
      ROW_COUNT => put(p, stmt.row_count),
      PARAM_COUNT => put(p, stmt.columns.len() as u32),
      ROWS_FETCHED => put(p, if stmt.cursor > 0 { 1u32 } else { 0 }),
      PREFETCH_ROWS => put(p, stmt.prefetch),
      ROW_ID => {
        let rowid = stmt.last_rowid.clone().ok_or_else(|| ora(1410, "invalid ROWID"))?;
        self.rowids.insert(p as usize, rowid);
      },
      _ => return Err(ora(24315, "illegal attribute type")),
    }
    Ok(())
  }
  unsafe fn param_attr(&self, id: usize, attr: c_uint, p: *mut c_void, sizep: *mut c_uint) -> Result<(), Fault> {
    let node = self.nodes.get(&id).ok_or_else(|| ora(24334, "no descriptor for this position"))?;
    if attr == PTYPE {
      put(p, node.ptype());
      return Ok(());
    }
    match (node, attr) {
      (&Node::Column(ref c), DATA_SIZE) => put(p, c.size),
      (&Node::Column(ref c), DATA_TYPE) => put(p, c.data_type),
      (&Node::Column(ref c), NAME) => put_str(p, sizep, &c.name),
      (&Node::Column(ref c), PRECISION) => put(p, c.precision),
      (&Node::Column(ref c), SCALE) => put(p, c.scale),
      (&Node::Column(ref c), IS_NULL) => put(p, c.nullable as u8),
      (&Node::Column(ref c), TYPE_NAME) => put_str(p, sizep, &c.type_name),
      (&Node::Column(ref c), SCHEMA_NAME) => put_str(p, sizep, &c.schema_name),
      (&Node::Column(ref c), CHARSET_ID) => put(p, if c.charset_form == 0 { 0u16 } else { 873 }),
      (&Node::Column(ref c), CHARSET_FORM) => put(p, c.charset_form),
      (&Node::Column(ref c), CHAR_USED) => put(p, c.char_used as u8),
      (&Node::Column(ref c), CHAR_SIZE) => put(p, c.char_size),
      (&Node::Column(ref c), INVISIBLE) => put(p, c.invisible as u8),

      (&Node::Table { ref name, .. }, OBJ_NAME) => put_str(p, sizep, name),
      (&Node::Table { ref schema, .. }, OBJ_SCHEMA) => put_str(p, sizep, schema),
      (&Node::Table { id, .. }, OBJ_ID) => put(p, id),
      (&Node::Table { ncols, .. }, NUM_COLS) => put(p, ncols),
      (&Node::Table { columns, .. }, LIST_COLUMNS) => put(p, columns as *mut c_void),

      (&Node::List(ref items), NUM_PARAMS) => put(p, items.len() as u16),

      (&Node::Schema { ref name, .. }, SCHEMA_NAME) |
      (&Node::Schema { ref name, .. }, OBJ_NAME) => put_str(p, sizep, name),
      (&Node::Schema { objects, .. }, LIST_OBJECTS) => put(p, objects as *mut c_void),

      (&Node::Database { schemas }, LIST_SCHEMAS) => put(p, schemas as *mut c_void),

      (&Node::Other { ref name, .. }, OBJ_NAME) => put_str(p, sizep, name),
      _ => return Err(ora(24315, "illegal attribute type")),
    }
    Ok(())
  }

  unsafe fn execute(&mut self, stmt: &mut Stmt, iters: u32, mode: u32) -> Result<(), Fault> {
    let describe_only = mode & execute_mode::DESCRIBE_ONLY != 0;
    stmt.rows.clear();
    stmt.cursor = 0;
    stmt.fetchable = false;
    stmt.row_count = 0;
    match stmt.command.clone() {
      Command::Select { items, table, filter } => self.select(stmt, &items, &table, filter.as_ref(), describe_only),
      _ if describe_only => Ok(()),
      _ if iters == 0 => Err(ora(24333, "zero iteration count")),
      Command::Insert { table, columns, values } => self.insert(stmt, &table, &columns, &values, iters),
      Command::Delete { table } => {
        let t = self.db.find(&table).ok_or_else(|| ora(942, "table or view does not exist"))?;
        let rows = &mut self.db.tables[t].rows;
        stmt.row_count = rows.len() as u32;
        rows.clear();
        Ok(())
      },
      Command::Block { assignments } => stmt.run(&assignments),
      Command::Other => Ok(()),
    }
  }
  unsafe fn select(&mut self, stmt: &mut Stmt, items: &[Item], table: &str, filter: Option<&(String, Item)>, describe_only: bool) -> Result<(), Fault> {
    let source = if table.eq_ignore_ascii_case("dual") {
      None
    } else {
      Some(self.db.find(table).ok_or_else(|| ora(942, "table or view does not exist"))?)
    };
    let (columns, rows) = match source {
      Some(t) => (self.db.tables[t].columns.clone(), self.db.tables[t].rows.clone()),
      None => (vec![ColumnDef::varchar("DUMMY", 1)], vec![vec![Cell::text("X")]]),
    };
    let position = |name: &str| {
      columns.iter().position(|c| c.name == name).ok_or_else(|| ora(904, format!("\"{}\": invalid identifier", name)))
    };

    let mut described = Vec::with_capacity(items.len());
    for item in items {
      described.push(match *item {
        Item::Bind(ordinal, ref name) => stmt.bound(ordinal, name)?.describe(name),
        Item::Count => ColumnDef::number("COUNT(*)", 0, -127),
        Item::RowId => ColumnDef::rowid(),
        Item::Column(ref name) => columns[position(name)?].clone(),
        Item::Number(n) => ColumnDef::number(&n.to_string(), 0, -127),
        Item::Text(ref t) => ColumnDef { data_type: Type::AFC.code(), ..ColumnDef::varchar(&format!("'{}'", t), t.len() as u16) },
        Item::Null => ColumnDef::varchar("NULL", 0),
      });
    }
    stmt.params = described.iter().map(|c| self.add_node(Node::Column(c.clone()))).collect();
    stmt.columns = described;
    if describe_only {
      return Ok(());
    }

    let mut selected = Vec::new();
    for (index, row) in rows.iter().enumerate() {
      if let Some(&(ref column, ref value)) = filter {
        let expected = stmt.eval(value, 0)?;
        if !row[position(column)?].matches(&expected) {
          continue;
        }
      }
      selected.push((index, row));
    }
    if items.contains(&Item::Count) {
      let count = selected.len() as i64;
      stmt.rows = vec![items.iter().map(|i| if *i == Item::Count { Cell::Int(count) } else { Cell::Null }).collect()];
    } else {
      for (index, row) in selected {
        let mut cells = Vec::with_capacity(items.len());
        for item in items {
          cells.push(match *item {
            Item::Column(ref name) => row[position(name)?].clone(),
            Item::RowId => Cell::Text(rowid(source.unwrap_or(0), index)),
            ref other => stmt.eval(other, 0)?,
          });
        }
        stmt.rows.push(cells);
      }
    }
    stmt.fetchable = true;
    Ok(())
  }
  unsafe fn insert(&mut self, stmt: &mut Stmt, table: &str, columns: &[String], values: &[Item], iters: u32) -> Result<(), Fault> {
    let t = self.db.find(table).ok_or_else(|| ora(942, "table or view does not exist"))?;
    let defs = self.db.tables[t].columns.clone();
    let targets: Vec<usize> = if columns.is_empty() {
      (0..defs.len()).collect()
    } else {
      columns.iter()
        .map(|c| defs.iter().position(|d| d.name == *c).ok_or_else(|| ora(904, format!("\"{}\": invalid identifier", c))))
        .collect::<Result<_, _>>()?
    };
    if values.len() > targets.len() {
      return Err(ora(913, "too many values"));
    }
    if values.len() < targets.len() {
      return Err(ora(947, "not enough values"));
    }
    let mut rows = Vec::with_capacity(iters as usize);
    for iter in 0..iters as usize {
      let mut row = vec![Cell::Null; defs.len()];
      for (&target, value) in targets.iter().zip(values) {
        row[target] = stmt.eval(value, iter)?;
      }
      if let Some((d, _)) = defs.iter().zip(&row).find(|&(d, c)| !d.nullable && *c == Cell::Null) {
        let t = &self.db.tables[t];
        return Err(ora(1400, format!("cannot insert NULL into (\"{}\".\"{}\".\"{}\")", t.schema, t.name, d.name)));
      }
      rows.push(row);
    }
    let rows_in_table = {
      let table = &mut self.db.tables[t];
      table.rows.extend(rows);
      table.rows.len()
    };
    stmt.row_count = iters;
    stmt.last_rowid = Some(rowid(t, rows_in_table - 1));
    Ok(())
  }

  unsafe fn fetch(&mut self, stmt: &mut Stmt, err: usize) -> c_int {
    if !stmt.fetchable {
      return self.fail(err, ora(24374, "define not done before fetch or execute and fetch"));
    }
    if stmt.cursor >= stmt.rows.len() {
      return status::NO_DATA;
    }
    let row = stmt.rows[stmt.cursor].clone();
    stmt.cursor += 1;
    stmt.row_count += 1;

    let mut truncated = false;
    for (&pos, define) in &stmt.defines {
      let cell = row.get(pos as usize - 1).cloned().unwrap_or(Cell::Null);
      match self.store(define, &cell) {
        Ok(t) => truncated |= t,
        Err(fault) => return self.fail(err, fault),
      }
    }
    if truncated {
      self.diagnostics.insert(err, vec![ora(24345, "A Truncation or null fetch error occurred")]);
      return status::SUCCESS_WITH_INFO;
    }
    status::SUCCESS
  }
  /// Записывает значение в буферы определения. Возвращает `true`, если значение было усечено.
  unsafe fn store(&mut self, d: &DefineEntry, cell: &Cell) -> Result<bool, Fault> {
    let ty = Type::from_code(d.dty);
    set(d.rcodep, 0u16);
    if *cell == Cell::Null {
      set(d.indp, -1i16);
      set(d.rlenp, 0u32);
      if ty == Some(Type::NTY) {
        if let Some(&(instance, _)) = self.objects.get(&d.handle) {
          set(instance, 0usize);
        }
      }
      return Ok(false);
    }
    set(d.indp, 0i16);
    match ty {
      Some(Type::RDD) => {
        let desc = *(d.valuep as *const usize);
        self.rowids.insert(desc, cell.as_text());
        return Ok(false);
      },
      Some(Type::CLOB) | Some(Type::BLOB) | Some(Type::BFILEE) | Some(Type::CFILEE) => return Ok(false),
      Some(Type::NTY) => {
        if let Some(&(instance, null_struct)) = self.objects.get(&d.handle) {
          let i = self.next_id();
          let n = self.next_id();
          set(instance, i);
          set(null_struct, n);
        }
        return Ok(false);
      },
      _ => {},
    }
    let size = d.value_sz as usize;
    let data = cell.encode(d.dty, size)?;
    let n = data.len().min(size);
    ptr::copy_nonoverlapping(data.as_ptr(), d.valuep as *mut u8, n);
    set(d.rlenp, n as u32);
    if n < data.len() {
      set(d.rcodep, 1406u16);
      return Ok(true);
    }
    Ok(false)
  }
}

//-------------------------------------------------------------------------------------------------
/// Реализация нативного интерфейса поверх базы в памяти.
#[derive(Debug)]
pub struct FakeOci {
  state: Mutex<State>,
}
impl FakeOci {
  pub fn new(db: Database) -> Arc<Self> {
    let state = State { db: db, next: 0x10000, ..Default::default() };
    Arc::new(FakeOci { state: Mutex::new(state) })
  }
  /// Тестовая база из [`Database::sample()`]
  pub fn sample() -> Arc<Self> {
    Self::new(Database::sample())
  }
  fn lock(&self) -> MutexGuard<State> {
    self.state.lock().expect("fake state poisoned")
  }
  /// Количество вызовов нативной функции. Имя совпадает с именем метода типажа `Oci`.
  pub fn calls(&self, func: &str) -> usize {
    self.lock().calls.get(func).cloned().unwrap_or(0)
  }
  /// Количество освобожденных дескрипторов указанного вида.
  pub fn freed_descriptors(&self, kind: DescriptorType) -> usize {
    self.lock().freed.iter().filter(|&&k| k == kind.code()).count()
  }
  /// Количество еще не освобожденных хендлов, дескрипторов и выражений.
  pub fn live_handles(&self) -> usize {
    let s = self.lock();
    s.handles.len() + s.descriptors.len() + s.stmts.len()
  }
  /// Следующий вызов `func` завершится ошибкой с указанными диагностическими записями.
  pub fn fail(&self, func: &'static str, records: &[(i32, &str)]) {
    let records = records.iter().map(|&(c, m)| (c, m.to_owned())).collect();
    self.lock().injected.insert(func, Injected::Error(records));
  }
  /// Следующий вызов `func` ничего не сделает и вернет `OCI_SUCCESS_WITH_INFO` с указанными записями.
  pub fn warn(&self, func: &'static str, records: &[(i32, &str)]) {
    let records = records.iter().map(|&(c, m)| (c, m.to_owned())).collect();
    self.lock().injected.insert(func, Injected::Info(records));
  }
  /// Текущее содержимое таблицы схемы по умолчанию.
  pub fn rows(&self, table: &str) -> Vec<Vec<Cell>> {
    let s = self.lock();
    s.db.find(table).map(|t| s.db.tables[t].rows.clone()).unwrap_or_default()
  }
}

macro_rules! enter {
  ($self:ident, $func:expr, $handle:expr) => {{
    let mut s = $self.lock();
    if let Some(rc) = s.enter($func, $handle as usize) {
      return rc;
    }
    s
  }};
}

impl Oci for FakeOci {
  unsafe fn env_create(&self, envhpp: *mut *mut OCIEnv, _mode: c_uint, _charset: c_ushort, _ncharset: c_ushort) -> c_int {
    let mut s = self.lock();
    // Хендл создается и при ошибке, диагностика читается из него
    let id = s.alloc_handle(HandleType::Env.code());
    *envhpp = id as *mut OCIEnv;
    s.enter("env_create", id).unwrap_or(status::SUCCESS)
  }

  unsafe fn handle_alloc(&self, parenth: *const c_void, hndlpp: *mut *mut c_void, htype: c_uint) -> c_int {
    let mut s = enter!(self, "handle_alloc", parenth);
    *hndlpp = s.alloc_handle(htype) as *mut c_void;
    status::SUCCESS
  }
  unsafe fn handle_free(&self, hndlp: *mut c_void, htype: c_uint) -> c_int {
    let mut s = enter!(self, "handle_free", 0);
    let id = hndlp as usize;
    match s.handles.remove(&id) {
      Some(kind) if kind == htype => {
        s.diagnostics.remove(&id);
        s.describes.remove(&id);
        s.logins.remove(&id);
        status::SUCCESS
      },
      _ => status::INVALID_HANDLE,
    }
  }
  unsafe fn descriptor_alloc(&self, parenth: *const c_void, descpp: *mut *mut c_void, dtype: c_uint) -> c_int {
    let mut s = enter!(self, "descriptor_alloc", parenth);
    if dtype == DescriptorType::Param.code() {
      return s.fail(parenth as usize, ora(24315, "illegal attribute type"));
    }
    *descpp = s.alloc_descriptor(dtype) as *mut c_void;
    status::SUCCESS
  }
  unsafe fn descriptor_free(&self, descp: *mut c_void, dtype: c_uint) -> c_int {
    let mut s = enter!(self, "descriptor_free", 0);
    s.freed.push(dtype);
    let id = descp as usize;
    s.rowids.remove(&id);
    match s.descriptors.remove(&id) {
      Some(kind) if kind == dtype => status::SUCCESS,
      _ => status::INVALID_HANDLE,
    }
  }
  unsafe fn array_descriptor_alloc(&self, parenth: *const c_void, descpp: *mut *mut c_void, dtype: c_uint, array_size: c_uint) -> c_int {
    let mut s = enter!(self, "array_descriptor_alloc", parenth);
    for i in 0..array_size as usize {
      *descpp.add(i) = s.alloc_descriptor(dtype) as *mut c_void;
    }
    if array_size > 0 {
      let first = *descpp as usize;
      s.arrays.insert(first, array_size as usize);
    }
    status::SUCCESS
  }
  unsafe fn array_descriptor_free(&self, descpp: *mut *mut c_void, dtype: c_uint) -> c_int {
    let mut s = enter!(self, "array_descriptor_free", 0);
    let first = *descpp as usize;
    let count = match s.arrays.remove(&first) {
      Some(count) => count,
      None => return status::INVALID_HANDLE,
    };
    for i in 0..count {
      let id = *descpp.add(i) as usize;
      s.descriptors.remove(&id);
      s.rowids.remove(&id);
      s.freed.push(dtype);
    }
    status::SUCCESS
  }

  unsafe fn error_get(&self, hndlp: *mut c_void, recordno: c_uint, errcodep: *mut c_int, bufp: *mut c_uchar, bufsiz: c_uint, _htype: c_uint) -> c_int {
    let mut s = self.lock();
    *s.calls.entry("error_get").or_insert(0) += 1;
    let record = s.diagnostics.get(&(hndlp as usize))
      .and_then(|records| records.get((recordno as usize).wrapping_sub(1)))
      .cloned();
    match record {
      Some((code, message)) => {
        *errcodep = code;
        let n = message.len().min(bufsiz as usize - 1);
        ptr::copy_nonoverlapping(message.as_ptr(), bufp, n);
        *bufp.add(n) = 0;
        status::SUCCESS
      },
      None => status::NO_DATA,
    }
  }

  unsafe fn server_attach(&self, _srvhp: *mut OCIServer, errhp: *mut OCIError, dblink: *const c_uchar, dblink_len: c_int, _mode: c_uint) -> c_int {
    let mut s = enter!(self, "server_attach", errhp);
    if !dblink.is_null() {
      let dblink = slice::from_raw_parts(dblink, dblink_len as usize);
      if dblink == b"nowhere" {
        return s.fail(errhp as usize, ora(12154, "TNS:could not resolve the connect identifier specified"));
      }
    }
    status::SUCCESS
  }
  unsafe fn server_detach(&self, _srvhp: *mut OCIServer, errhp: *mut OCIError, _mode: c_uint) -> c_int {
    let _s = enter!(self, "server_detach", errhp);
    status::SUCCESS
  }
  unsafe fn session_begin(&self, _svchp: *mut OCISvcCtx, errhp: *mut OCIError, usrhp: *mut OCISession, credt: c_uint, _mode: c_uint) -> c_int {
    let mut s = enter!(self, "session_begin", errhp);
    if credt != CredentialMode::Rdbms as c_uint {
      return status::SUCCESS;
    }
    let allowed = match s.logins.get(&(usrhp as usize)) {
      Some(&(ref user, ref password)) => s.db.users.iter().any(|u| u.0.eq_ignore_ascii_case(user) && u.1 == *password),
      None => false,
    };
    if !allowed {
      return s.fail(errhp as usize, ora(1017, "invalid username/password; logon denied"));
    }
    status::SUCCESS
  }
  unsafe fn session_end(&self, _svchp: *mut OCISvcCtx, errhp: *mut OCIError, _usrhp: *mut OCISession, _mode: c_uint) -> c_int {
    let _s = enter!(self, "session_end", errhp);
    status::SUCCESS
  }
  unsafe fn trans_commit(&self, _svchp: *mut OCISvcCtx, errhp: *mut OCIError, _flags: c_uint) -> c_int {
    let _s = enter!(self, "trans_commit", errhp);
    status::SUCCESS
  }
  unsafe fn trans_rollback(&self, _svchp: *mut OCISvcCtx, errhp: *mut OCIError, _flags: c_uint) -> c_int {
    let _s = enter!(self, "trans_rollback", errhp);
    status::SUCCESS
  }

  unsafe fn stmt_prepare(&self, _svchp: *mut OCISvcCtx, stmtp: *mut *mut OCIStmt, errhp: *mut OCIError,
                         stmt: *const c_uchar, stmt_len: c_uint,
                         _key: *const c_uchar, _key_len: c_uint,
                         _language: c_uint, _mode: c_uint) -> c_int {
    let mut s = enter!(self, "stmt_prepare", errhp);
    if stmt.is_null() || stmt_len == 0 {
      return s.fail(errhp as usize, ora(24373, "invalid length specified for statement"));
    }
    let sql = String::from_utf8_lossy(slice::from_raw_parts(stmt, stmt_len as usize)).into_owned();
    let id = s.next_id();
    s.stmts.insert(id, Stmt::new(&sql));
    *stmtp = id as *mut OCIStmt;
    status::SUCCESS
  }
  unsafe fn stmt_release(&self, stmtp: *mut OCIStmt, errhp: *mut OCIError, _key: *const c_uchar, _key_len: c_uint, _mode: c_uint) -> c_int {
    let mut s = enter!(self, "stmt_release", errhp);
    match s.stmts.remove(&(stmtp as usize)) {
      Some(_) => status::SUCCESS,
      None => status::INVALID_HANDLE,
    }
  }
  unsafe fn stmt_execute(&self, _svchp: *mut OCISvcCtx, stmtp: *mut OCIStmt, errhp: *mut OCIError, iters: c_uint, _rowoff: c_uint, mode: c_uint) -> c_int {
    let mut s = enter!(self, "stmt_execute", errhp);
    let id = stmtp as usize;
    let mut stmt = match s.stmts.remove(&id) {
      Some(stmt) => stmt,
      None => return status::INVALID_HANDLE,
    };
    let res = s.execute(&mut stmt, iters, mode);
    s.stmts.insert(id, stmt);
    match res {
      Ok(()) => status::SUCCESS,
      Err(fault) => s.fail(errhp as usize, fault),
    }
  }
  unsafe fn stmt_fetch(&self, stmtp: *mut OCIStmt, errhp: *mut OCIError, _nrows: c_uint, _orientation: c_ushort, _fetch_offset: c_int, _mode: c_uint) -> c_int {
    let mut s = enter!(self, "stmt_fetch", errhp);
    let id = stmtp as usize;
    let mut stmt = match s.stmts.remove(&id) {
      Some(stmt) => stmt,
      None => return status::INVALID_HANDLE,
    };
    let rc = s.fetch(&mut stmt, errhp as usize);
    s.stmts.insert(id, stmt);
    rc
  }

  unsafe fn bind_by_pos(&self, stmtp: *mut OCIStmt, bindpp: *mut *mut OCIBind, errhp: *mut OCIError,
                        position: c_uint,
                        valuep: *mut c_void, value_sz: i64, dty: c_ushort,
                        indp: *mut c_void, alenp: *mut u32, rcodep: *mut c_ushort,
                        _maxarr_len: c_uint, _curelep: *mut c_uint, _mode: c_uint) -> c_int {
    let mut s = enter!(self, "bind_by_pos", errhp);
    let handle = s.next_id();
    let stmt = match s.stmts.get_mut(&(stmtp as usize)) {
      Some(stmt) => stmt,
      None => return status::INVALID_HANDLE,
    };
    if position == 0 || position as usize > stmt.placeholders.len() {
      return s.fail(errhp as usize, ora(1036, "illegal variable name/number"));
    }
    stmt.bind(BindEntry {
      key: BindKey::Pos(position),
      valuep: valuep as usize,
      value_sz: value_sz,
      dty: dty,
      indp: indp as usize,
      alenp: alenp as usize,
      rcodep: rcodep as usize,
    });
    *bindpp = handle as *mut OCIBind;
    status::SUCCESS
  }
  unsafe fn bind_by_name(&self, stmtp: *mut OCIStmt, bindpp: *mut *mut OCIBind, errhp: *mut OCIError,
                         placeholder: *const c_uchar, placeh_len: c_int,
                         valuep: *mut c_void, value_sz: i64, dty: c_ushort,
                         indp: *mut c_void, alenp: *mut u32, rcodep: *mut c_ushort,
                         _maxarr_len: c_uint, _curelep: *mut c_uint, _mode: c_uint) -> c_int {
    let mut s = enter!(self, "bind_by_name", errhp);
    let name = String::from_utf8_lossy(slice::from_raw_parts(placeholder, placeh_len as usize)).into_owned();
    // Нативная библиотека требует двоеточие перед именем
    if !name.starts_with(':') {
      return s.fail(errhp as usize, ora(1036, "illegal variable name/number"));
    }
    let name = name[1..].to_lowercase();
    let handle = s.next_id();
    let stmt = match s.stmts.get_mut(&(stmtp as usize)) {
      Some(stmt) => stmt,
      None => return status::INVALID_HANDLE,
    };
    if !stmt.placeholders.contains(&name) {
      return s.fail(errhp as usize, ora(1036, "illegal variable name/number"));
    }
    stmt.bind(BindEntry {
      key: BindKey::Name(name),
      valuep: valuep as usize,
      value_sz: value_sz,
      dty: dty,
      indp: indp as usize,
      alenp: alenp as usize,
      rcodep: rcodep as usize,
    });
    *bindpp = handle as *mut OCIBind;
    status::SUCCESS
  }
  unsafe fn bind_object(&self, _bindp: *mut OCIBind, errhp: *mut OCIError, tdo: *const OCIType,
                        pgvpp: *mut *mut c_void, _pvszsp: *mut c_uint,
                        _indpp: *mut *mut c_void, _indszp: *mut c_uint) -> c_int {
    let mut s = enter!(self, "bind_object", errhp);
    if tdo.is_null() || pgvpp.is_null() {
      return s.fail(errhp as usize, ora(21560, "argument 3 is null, invalid, or out of range"));
    }
    status::SUCCESS
  }
  unsafe fn define_by_pos(&self, stmtp: *mut OCIStmt, defnpp: *mut *mut OCIDefine, errhp: *mut OCIError,
                          position: c_uint,
                          valuep: *mut c_void, value_sz: i64, dty: c_ushort,
                          indp: *mut c_void, rlenp: *mut u32, rcodep: *mut c_ushort,
                          _mode: c_uint) -> c_int {
    let mut s = enter!(self, "define_by_pos", errhp);
    let handle = s.next_id();
    let stmt = match s.stmts.get_mut(&(stmtp as usize)) {
      Some(stmt) => stmt,
      None => return status::INVALID_HANDLE,
    };
    if position == 0 || position as usize > stmt.columns.len() {
      return s.fail(errhp as usize, ora(24334, "no descriptor for this position"));
    }
    stmt.defines.insert(position, DefineEntry {
      handle: handle,
      valuep: valuep as usize,
      value_sz: value_sz,
      dty: dty,
      indp: indp as usize,
      rlenp: rlenp as usize,
      rcodep: rcodep as usize,
    });
    *defnpp = handle as *mut OCIDefine;
    status::SUCCESS
  }
  unsafe fn define_object(&self, defnp: *mut OCIDefine, errhp: *mut OCIError, tdo: *const OCIType,
                          pgvpp: *mut *mut c_void, _pvszsp: *mut c_uint,
                          indpp: *mut *mut c_void, _indszp: *mut c_uint) -> c_int {
    let mut s = enter!(self, "define_object", errhp);
    if tdo.is_null() || pgvpp.is_null() {
      return s.fail(errhp as usize, ora(21560, "argument 3 is null, invalid, or out of range"));
    }
    s.objects.insert(defnp as usize, (pgvpp as usize, indpp as usize));
    status::SUCCESS
  }

  unsafe fn param_get(&self, hndlp: *const c_void, htype: c_uint, errhp: *mut OCIError, parmdpp: *mut *mut c_void, pos: c_uint) -> c_int {
    let mut s = enter!(self, "param_get", errhp);
    let index = (pos as usize).wrapping_sub(1);
    let found = if htype == HandleType::Stmt.code() {
      s.stmts.get(&(hndlp as usize)).and_then(|stmt| stmt.params.get(index)).cloned()
    } else if htype == DescriptorType::Param.code() {
      match s.nodes.get(&(hndlp as usize)) {
        Some(&Node::List(ref items)) => items.get(index).cloned(),
        _ => None,
      }
    } else {
      None
    };
    match found {
      Some(id) => {
        *parmdpp = id as *mut c_void;
        status::SUCCESS
      },
      None => s.fail(errhp as usize, ora(24334, "no descriptor for this position")),
    }
  }
  unsafe fn attr_get(&self, trgthndlp: *const c_void, trghndltyp: c_uint,
                     attributep: *mut c_void, sizep: *mut c_uint,
                     attrtype: c_uint, errhp: *mut OCIError) -> c_int {
    let mut s = enter!(self, "attr_get", errhp);
    let target = trgthndlp as usize;
    let res = match HandleType::from_code(trghndltyp) {
      Some(HandleType::Stmt) => s.stmt_attr(target, attrtype, attributep),
      Some(HandleType::Describe) if attrtype == PARAM => match s.describes.get(&target) {
        Some(&root) => {
          put(attributep, root as *mut c_void);
          Ok(())
        },
        None => Err(ora(24315, "illegal attribute type")),
      },
      _ if trghndltyp == DescriptorType::Param.code() => s.param_attr(target, attrtype, attributep, sizep),
      _ => Err(ora(24315, "illegal attribute type")),
    };
    match res {
      Ok(()) => status::SUCCESS,
      Err(fault) => s.fail(errhp as usize, fault),
    }
  }
  unsafe fn attr_set(&self, trgthndlp: *mut c_void, trghndltyp: c_uint,
                     attributep: *mut c_void, size: c_uint,
                     attrtype: c_uint, errhp: *mut OCIError) -> c_int {
    let mut s = enter!(self, "attr_set", errhp);
    if trghndltyp == HandleType::Session.code() && (attrtype == USERNAME || attrtype == PASSWORD) {
      let value = String::from_utf8_lossy(slice::from_raw_parts(attributep as *const u8, size as usize)).into_owned();
      let login = s.logins.entry(trgthndlp as usize).or_insert_with(Default::default);
      if attrtype == USERNAME {
        login.0 = value;
      } else {
        login.1 = value;
      }
    }
    if trghndltyp == HandleType::Stmt.code() && attrtype == PREFETCH_ROWS {
      match s.stmts.get_mut(&(trgthndlp as usize)) {
        Some(stmt) => stmt.prefetch = *(attributep as *const u32),
        None => return s.fail(errhp as usize, ora(1001, "invalid cursor")),
      }
    }
    status::SUCCESS
  }
  unsafe fn describe_any(&self, _svchp: *mut OCISvcCtx, errhp: *mut OCIError,
                         objptr: *mut c_void, objnm_len: c_uint, _objptr_typ: c_uchar,
                         _info_level: c_uchar, objtyp: c_uchar, dschp: *mut OCIDescribe) -> c_int {
    let mut s = enter!(self, "describe_any", errhp);
    let name = String::from_utf8_lossy(slice::from_raw_parts(objptr as *const u8, objnm_len as usize)).into_owned();
    match s.describe(&name, objtyp) {
      Ok(root) => {
        s.describes.insert(dschp as usize, root);
        status::SUCCESS
      },
      Err(fault) => s.fail(errhp as usize, fault),
    }
  }
  unsafe fn type_by_name(&self, _envhp: *mut OCIEnv, errhp: *mut OCIError, _svchp: *const OCISvcCtx,
                         schema_name: *const c_uchar, s_length: c_uint,
                         type_name: *const c_uchar, t_length: c_uint,
                         _pin_duration: c_ushort, _get_option: c_uint,
                         tdo: *mut *mut OCIType) -> c_int {
    let mut s = enter!(self, "type_by_name", errhp);
    let schema = if schema_name.is_null() {
      s.db.default_schema()
    } else {
      String::from_utf8_lossy(slice::from_raw_parts(schema_name, s_length as usize)).into_owned()
    };
    let name = String::from_utf8_lossy(slice::from_raw_parts(type_name, t_length as usize)).into_owned();
    if !s.db.types.iter().any(|t| t.0 == schema && t.1 == name) {
      return s.fail(errhp as usize, ora(4043, format!("object {}.{} does not exist", schema, name)));
    }
    *tdo = s.next_id() as *mut OCIType;
    status::SUCCESS
  }
  unsafe fn rowid_to_char(&self, rowid: *mut OCIRowid, outbfp: *mut c_uchar, outbflp: *mut c_ushort, errhp: *mut OCIError) -> c_int {
    let mut s = enter!(self, "rowid_to_char", errhp);
    let text = match s.rowids.get(&(rowid as usize)) {
      Some(text) => text.clone(),
      None => return s.fail(errhp as usize, ora(1410, "invalid ROWID")),
    };
    if text.len() > *outbflp as usize {
      return s.fail(errhp as usize, ora(1406, "fetched column value was truncated"));
    }
    ptr::copy_nonoverlapping(text.as_ptr(), outbfp, text.len());
    *outbflp = text.len() as c_ushort;
    status::SUCCESS
  }
  unsafe fn server_release(&self, _hndlp: *mut c_void, errhp: *mut OCIError, bufp: *mut c_uchar, bufsz: c_uint, _hndltype: c_uchar, version: *mut c_uint) -> c_int {
    let _s = enter!(self, "server_release", errhp);
    let banner = b"Oracle Database 19c Enterprise Edition Release 19.0.0.0.0 - Production";
    let n = banner.len().min(bufsz as usize - 1);
    ptr::copy_nonoverlapping(banner.as_ptr(), bufp, n);
    *bufp.add(n) = 0;
    *version = 0x1303_0000;
    status::SUCCESS
  }
  fn client_version(&self) -> (c_int, c_int, c_int, c_int, c_int) {
    (19, 3, 0, 0, 0)
  }
}
