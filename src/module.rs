//! Serializable model of a module's symbol table.
//!
//! Stands in for the host's loaded module: `swear patch` reads one from a
//! YAML or JSON file, renames it through [`SymbolGraph`], and writes it back.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SwearError;
use crate::ports::{FileSystem, SymbolDomain, SymbolGraph};

/// All type definitions of one module.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleSymbols {
    /// Module name, e.g. `Assembly-CSharp.dll`.
    pub name: String,
    /// Top-level types.
    #[serde(default)]
    pub types: Vec<TypeSymbol>,
}

/// A type definition and its members.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeSymbol {
    /// Simple name.
    pub name: String,
    /// Namespace; never renamed.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Methods.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodSymbol>,
    /// Fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<MemberSymbol>,
    /// Properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<MemberSymbol>,
    /// Events.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<MemberSymbol>,
    /// Types declared inside this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_types: Vec<TypeSymbol>,
}

/// A method and its parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MethodSymbol {
    /// Method name.
    pub name: String,
    /// Parameters, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<MemberSymbol>,
}

/// Any other named member (field, property, event, parameter).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberSymbol {
    /// Member name.
    pub name: String,
}

impl MemberSymbol {
    /// Creates a member with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Position of a type: indices from `ModuleSymbols::types` down through
/// `nested_types`.
pub type TypePath = Vec<usize>;

/// Reference to one symbol of a [`ModuleSymbols`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolHandle {
    /// A type.
    Type(TypePath),
    /// Method `1` of a type.
    Method(TypePath, usize),
    /// Parameter `2` of method `1` of a type.
    Parameter(TypePath, usize, usize),
    /// Field `1` of a type.
    Field(TypePath, usize),
    /// Property `1` of a type.
    Property(TypePath, usize),
    /// Event `1` of a type.
    Event(TypePath, usize),
}

/// Serialization used for a module file, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFormat {
    /// `.json`
    Json,
    /// Anything else.
    Yaml,
}

impl ModuleFormat {
    /// Picks the format for `path`.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

impl ModuleSymbols {
    /// Reads a module file through the filesystem port.
    ///
    /// # Errors
    ///
    /// Returns [`SwearError::Storage`] if the file cannot be read and
    /// [`SwearError::ModuleFormat`] if it does not parse.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, SwearError> {
        let text = fs.read_to_string(path).map_err(|e| SwearError::storage("read", path, e))?;
        let parsed = match ModuleFormat::for_path(path) {
            ModuleFormat::Json => serde_json::from_str(&text).map_err(|e| e.to_string()),
            ModuleFormat::Yaml => serde_yaml::from_str(&text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| SwearError::ModuleFormat { path: path.to_path_buf(), message })
    }

    /// Writes the module to `path`, in the format its extension selects.
    ///
    /// # Errors
    ///
    /// Returns [`SwearError::ModuleFormat`] if serialization fails and
    /// [`SwearError::Storage`] if the file cannot be written.
    pub fn save(&self, fs: &dyn FileSystem, path: &Path) -> Result<(), SwearError> {
        let text = match ModuleFormat::for_path(path) {
            ModuleFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            ModuleFormat::Yaml => serde_yaml::to_string(self).map_err(|e| e.to_string()),
        }
        .map_err(|message| SwearError::ModuleFormat { path: path.to_path_buf(), message })?;
        fs.write(path, &text).map_err(|e| SwearError::storage("write", path, e))
    }

    /// Paths of every type, nested ones included, depth-first.
    #[must_use]
    pub fn type_paths(&self) -> Vec<TypePath> {
        fn walk(types: &[TypeSymbol], prefix: &mut TypePath, out: &mut Vec<TypePath>) {
            for (i, ty) in types.iter().enumerate() {
                prefix.push(i);
                out.push(prefix.clone());
                walk(&ty.nested_types, prefix, out);
                prefix.pop();
            }
        }
        let mut out = Vec::new();
        walk(&self.types, &mut Vec::new(), &mut out);
        out
    }

    fn type_at(&self, path: &[usize]) -> &TypeSymbol {
        let (first, rest) = path.split_first().expect("type path is never empty");
        rest.iter().fold(&self.types[*first], |ty, &i| &ty.nested_types[i])
    }

    fn type_at_mut(&mut self, path: &[usize]) -> &mut TypeSymbol {
        let (first, rest) = path.split_first().expect("type path is never empty");
        rest.iter().fold(&mut self.types[*first], |ty, &i| &mut ty.nested_types[i])
    }

    fn name_mut(&mut self, handle: &SymbolHandle) -> &mut String {
        match handle {
            SymbolHandle::Type(p) => &mut self.type_at_mut(p).name,
            SymbolHandle::Method(p, m) => &mut self.type_at_mut(p).methods[*m].name,
            SymbolHandle::Parameter(p, m, a) => {
                &mut self.type_at_mut(p).methods[*m].parameters[*a].name
            }
            SymbolHandle::Field(p, i) => &mut self.type_at_mut(p).fields[*i].name,
            SymbolHandle::Property(p, i) => &mut self.type_at_mut(p).properties[*i].name,
            SymbolHandle::Event(p, i) => &mut self.type_at_mut(p).events[*i].name,
        }
    }
}

impl SymbolGraph for ModuleSymbols {
    type Handle = SymbolHandle;

    fn symbols(&self, domain: SymbolDomain) -> Vec<SymbolHandle> {
        let mut out = Vec::new();
        for path in self.type_paths() {
            let ty = self.type_at(&path);
            match domain {
                SymbolDomain::Type => out.push(SymbolHandle::Type(path)),
                SymbolDomain::Method => {
                    out.extend(
                        (0..ty.methods.len()).map(|m| SymbolHandle::Method(path.clone(), m)),
                    );
                }
                SymbolDomain::Parameter => {
                    for (m, method) in ty.methods.iter().enumerate() {
                        out.extend(
                            (0..method.parameters.len())
                                .map(|a| SymbolHandle::Parameter(path.clone(), m, a)),
                        );
                    }
                }
                SymbolDomain::Field => {
                    out.extend((0..ty.fields.len()).map(|i| SymbolHandle::Field(path.clone(), i)));
                }
                SymbolDomain::Property => out.extend(
                    (0..ty.properties.len()).map(|i| SymbolHandle::Property(path.clone(), i)),
                ),
                SymbolDomain::Event => {
                    out.extend((0..ty.events.len()).map(|i| SymbolHandle::Event(path.clone(), i)));
                }
            }
        }
        out
    }

    fn name(&self, handle: &SymbolHandle) -> &str {
        match handle {
            SymbolHandle::Type(p) => &self.type_at(p).name,
            SymbolHandle::Method(p, m) => &self.type_at(p).methods[*m].name,
            SymbolHandle::Parameter(p, m, a) => &self.type_at(p).methods[*m].parameters[*a].name,
            SymbolHandle::Field(p, i) => &self.type_at(p).fields[*i].name,
            SymbolHandle::Property(p, i) => &self.type_at(p).properties[*i].name,
            SymbolHandle::Event(p, i) => &self.type_at(p).events[*i].name,
        }
    }

    fn rename(&mut self, handle: &SymbolHandle, new_name: &str) {
        new_name.clone_into(self.name_mut(handle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;

    fn sample() -> ModuleSymbols {
        ModuleSymbols {
            name: "Assembly-CSharp.dll".into(),
            types: vec![TypeSymbol {
                name: "OUTERTYPEAB".into(),
                methods: vec![MethodSymbol {
                    name: "METHODAAAAA".into(),
                    parameters: vec![MemberSymbol::new("PARAMAAAAAA"), MemberSymbol::new("count")],
                }],
                fields: vec![MemberSymbol::new("FIELDAAAAAA")],
                nested_types: vec![TypeSymbol {
                    name: "INNERTYPEAB".into(),
                    events: vec![MemberSymbol::new("EVENTAAAAAA")],
                    ..TypeSymbol::default()
                }],
                ..TypeSymbol::default()
            }],
        }
    }

    #[test]
    fn type_domain_includes_nested_types() {
        let module = sample();
        let names: Vec<&str> =
            module.symbols(SymbolDomain::Type).iter().map(|h| module.name(h)).collect();
        assert_eq!(names, vec!["OUTERTYPEAB", "INNERTYPEAB"]);
    }

    #[test]
    fn parameters_and_nested_members_are_listed() {
        let module = sample();
        let params: Vec<&str> =
            module.symbols(SymbolDomain::Parameter).iter().map(|h| module.name(h)).collect();
        assert_eq!(params, vec!["PARAMAAAAAA", "count"]);

        let events = module.symbols(SymbolDomain::Event);
        assert_eq!(events, vec![SymbolHandle::Event(vec![0, 0], 0)]);
        assert_eq!(module.name(&events[0]), "EVENTAAAAAA");
        assert!(module.symbols(SymbolDomain::Property).is_empty());
    }

    #[test]
    fn rename_through_handle() {
        let mut module = sample();
        module.rename(&SymbolHandle::Type(vec![0, 0]), "Inner");
        module.rename(&SymbolHandle::Parameter(vec![0], 0, 0), "target");

        assert_eq!(module.types[0].nested_types[0].name, "Inner");
        assert_eq!(module.types[0].methods[0].parameters[0].name, "target");
    }

    #[test]
    fn yaml_and_json_files_round_trip() {
        let fs = MemoryFileSystem::new();
        let module = sample();

        module.save(&fs, Path::new("/m/module.yaml")).unwrap();
        module.save(&fs, Path::new("/m/module.json")).unwrap();

        assert_eq!(ModuleSymbols::load(&fs, Path::new("/m/module.yaml")).unwrap(), module);
        assert_eq!(ModuleSymbols::load(&fs, Path::new("/m/module.json")).unwrap(), module);
        assert!(fs.file(Path::new("/m/module.json")).unwrap().trim_start().starts_with('{'));
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let fs = MemoryFileSystem::new().with_file(
            "/m/min.yaml",
            "name: Game.dll\ntypes:\n  - name: ABCDEFGHIJK\n    fields:\n      - name: KJIHGFEDCBA\n",
        );
        let module = ModuleSymbols::load(&fs, Path::new("/m/min.yaml")).unwrap();
        assert_eq!(module.types[0].fields[0].name, "KJIHGFEDCBA");
        assert!(module.types[0].methods.is_empty());
    }

    #[test]
    fn unparsable_file_is_a_format_error() {
        let fs = MemoryFileSystem::new().with_file("/m/bad.json", "{not json");
        let err = ModuleSymbols::load(&fs, Path::new("/m/bad.json")).unwrap_err();
        assert!(matches!(err, SwearError::ModuleFormat { .. }));
    }
}
