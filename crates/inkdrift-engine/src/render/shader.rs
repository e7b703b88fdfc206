use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use naga::valid::{Capabilities, ValidationFlags, Validator};

// ── errors ────────────────────────────────────────────────────────────────

/// Which half of a program a shader source belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Shader program setup failure. Both variants are fatal to startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// One stage failed to parse or validate. `log` is the compiler output.
    Compile { stage: ShaderStage, log: String },

    /// Both stages compiled but do not fit together.
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile:\n{log}")
            }
            ShaderError::Link { log } => write!(f, "shader program failed to link:\n{log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

fn link_err(log: impl Into<String>) -> ShaderError {
    ShaderError::Link { log: log.into() }
}

// ── locations ─────────────────────────────────────────────────────────────

/// Where a named uniform lives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UniformLocation {
    /// A member of a uniform buffer struct, `size` bytes at `offset`.
    Field {
        group: u32,
        binding: u32,
        offset: u32,
        size: u32,
    },

    /// A whole binding: a uniform buffer, texture or sampler.
    Resource { group: u32, binding: u32 },
}

impl UniformLocation {
    pub fn binding(self) -> (u32, u32) {
        match self {
            UniformLocation::Field { group, binding, .. } => (group, binding),
            UniformLocation::Resource { group, binding } => (group, binding),
        }
    }
}

/// Vertex input slot (`@location`) of a named attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AttribLocation(pub u32);

/// Kind of resource bound at one `@binding`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BindingKind {
    UniformBuffer { size: u32 },
    Texture,
    Sampler,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingInfo {
    pub name: String,
    pub binding: u32,
    pub kind: BindingKind,
}

// ── interface (device-free) ───────────────────────────────────────────────

/// The linked, reflected interface of a vertex + fragment pair.
///
/// Built purely from WGSL source; no GPU device is involved. Every resource
/// must live in `@group(0)`.
#[derive(Debug, Clone)]
pub struct ShaderInterface {
    vertex_entry: String,
    fragment_entry: String,
    attributes: HashMap<String, AttribLocation>,
    uniforms: HashMap<String, UniformLocation>,
    bindings: Vec<BindingInfo>,
}

impl ShaderInterface {
    /// Compiles both stages and checks that they link.
    ///
    /// Link checks:
    /// - every fragment `@location` input is written by the vertex stage
    /// - a binding declared by both stages has the same name and kind
    /// - uniform names are unambiguous across bindings and struct members
    pub fn link(vertex_src: &str, fragment_src: &str) -> Result<Self, ShaderError> {
        let vs = compile_stage(ShaderStage::Vertex, vertex_src)?;
        let fs = compile_stage(ShaderStage::Fragment, fragment_src)?;

        let vs_entry = entry_point(&vs, ShaderStage::Vertex)?;
        let fs_entry = entry_point(&fs, ShaderStage::Fragment)?;

        // stage interface
        let outputs: HashMap<u32, String> = vs_entry
            .function
            .result
            .as_ref()
            .map(|r| located(&vs, None, r.ty, r.binding.as_ref()))
            .unwrap_or_default()
            .into_iter()
            .map(|(name, loc)| (loc, name))
            .collect();

        for arg in &fs_entry.function.arguments {
            for (name, loc) in located(&fs, arg.name.as_deref(), arg.ty, arg.binding.as_ref()) {
                if !outputs.contains_key(&loc) {
                    return Err(link_err(format!(
                        "fragment input `{name}` at @location({loc}) is not written by the vertex stage"
                    )));
                }
            }
        }

        // vertex attributes
        let mut attributes = HashMap::new();
        for arg in &vs_entry.function.arguments {
            for (name, loc) in located(&vs, arg.name.as_deref(), arg.ty, arg.binding.as_ref()) {
                attributes.insert(name, AttribLocation(loc));
            }
        }

        // resources
        let mut merged: BTreeMap<u32, (BindingInfo, Vec<(String, u32, u32)>)> = BTreeMap::new();
        for (stage, module) in [(ShaderStage::Vertex, &vs), (ShaderStage::Fragment, &fs)] {
            for (info, fields) in resources(stage, module)? {
                match merged.get(&info.binding) {
                    None => {
                        merged.insert(info.binding, (info, fields));
                    }
                    Some((prev, _)) if prev.name == info.name && prev.kind == info.kind => {}
                    Some((prev, _)) => {
                        return Err(link_err(format!(
                            "@binding({}) is `{}` ({:?}) in one stage and `{}` ({:?}) in the other",
                            info.binding, prev.name, prev.kind, info.name, info.kind
                        )));
                    }
                }
            }
        }

        let mut uniforms = HashMap::new();
        let mut insert = |name: String, loc: UniformLocation| -> Result<(), ShaderError> {
            if uniforms.insert(name.clone(), loc).is_some() {
                return Err(link_err(format!("uniform name `{name}` is ambiguous")));
            }
            Ok(())
        };

        for (info, fields) in merged.values() {
            insert(
                info.name.clone(),
                UniformLocation::Resource {
                    group: 0,
                    binding: info.binding,
                },
            )?;
            for (name, offset, size) in fields {
                insert(
                    name.clone(),
                    UniformLocation::Field {
                        group: 0,
                        binding: info.binding,
                        offset: *offset,
                        size: *size,
                    },
                )?;
            }
        }

        Ok(Self {
            vertex_entry: vs_entry.name.clone(),
            fragment_entry: fs_entry.name.clone(),
            attributes,
            uniforms,
            bindings: merged.into_values().map(|(info, _)| info).collect(),
        })
    }

    pub fn vertex_entry(&self) -> &str {
        &self.vertex_entry
    }

    pub fn fragment_entry(&self) -> &str {
        &self.fragment_entry
    }

    /// Bindings of `@group(0)`, ordered by binding index.
    pub fn bindings(&self) -> &[BindingInfo] {
        &self.bindings
    }

    /// Looks up a uniform, struct member or resource by name.
    pub fn try_uniform(&self, name: &str) -> Option<UniformLocation> {
        self.uniforms.get(name).copied()
    }

    pub fn try_attribute(&self, name: &str) -> Option<AttribLocation> {
        self.attributes.get(name).copied()
    }
}

fn compile_stage(stage: ShaderStage, src: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(src).map_err(|e| ShaderError::Compile {
        stage,
        log: e.emit_to_string(src),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|e| ShaderError::Compile {
            stage,
            log: e.emit_to_string(src),
        })?;

    Ok(module)
}

fn entry_point(module: &naga::Module, stage: ShaderStage) -> Result<&naga::EntryPoint, ShaderError> {
    let mut found = module.entry_points.iter().filter(|ep| ep.stage == stage.naga());
    match (found.next(), found.next()) {
        (Some(ep), None) => Ok(ep),
        (None, _) => Err(ShaderError::Compile {
            stage,
            log: format!("no @{stage} entry point"),
        }),
        (Some(_), Some(_)) => Err(ShaderError::Compile {
            stage,
            log: format!("more than one @{stage} entry point"),
        }),
    }
}

/// `(name, location)` pairs for a value with an optional binding, flattening
/// one level of struct members. Builtins are skipped.
fn located(
    module: &naga::Module,
    name: Option<&str>,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
) -> Vec<(String, u32)> {
    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            vec![(name.unwrap_or_default().to_string(), *location)]
        }
        Some(naga::Binding::BuiltIn(_)) => Vec::new(),
        None => match &module.types[ty].inner {
            naga::TypeInner::Struct { members, .. } => members
                .iter()
                .filter_map(|m| match m.binding {
                    Some(naga::Binding::Location { location, .. }) => {
                        Some((m.name.clone().unwrap_or_default(), location))
                    }
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        },
    }
}

type Resource = (BindingInfo, Vec<(String, u32, u32)>);

/// Bound globals of one module, with uniform struct members as
/// `(name, offset, size)`.
fn resources(stage: ShaderStage, module: &naga::Module) -> Result<Vec<Resource>, ShaderError> {
    let gctx = module.to_ctx();
    let mut out = Vec::new();

    for (_, global) in module.global_variables.iter() {
        let Some(rb) = &global.binding else { continue };
        let name = global.name.clone().unwrap_or_default();

        if rb.group != 0 {
            return Err(link_err(format!(
                "{stage} resource `{name}` is in @group({}); only @group(0) is supported",
                rb.group
            )));
        }

        let inner = &module.types[global.ty].inner;
        let (kind, fields) = match (global.space, inner) {
            (naga::AddressSpace::Uniform, naga::TypeInner::Struct { members, span }) => {
                let fields = members
                    .iter()
                    .filter_map(|m| {
                        let size = module.types[m.ty].inner.size(gctx);
                        m.name.clone().map(|n| (n, m.offset, size))
                    })
                    .collect();
                (BindingKind::UniformBuffer { size: *span }, fields)
            }
            (naga::AddressSpace::Uniform, other) => {
                (BindingKind::UniformBuffer { size: other.size(gctx) }, Vec::new())
            }
            (naga::AddressSpace::Handle, naga::TypeInner::Image { .. }) => {
                (BindingKind::Texture, Vec::new())
            }
            (naga::AddressSpace::Handle, naga::TypeInner::Sampler { comparison: false }) => {
                (BindingKind::Sampler, Vec::new())
            }
            _ => {
                return Err(link_err(format!(
                    "{stage} resource `{name}` at @binding({}) has an unsupported type",
                    rb.binding
                )));
            }
        };

        out.push((
            BindingInfo {
                name,
                binding: rb.binding,
                kind,
            },
            fields,
        ));
    }

    Ok(out)
}

// ── program ───────────────────────────────────────────────────────────────

/// A linked vertex + fragment program and its GPU shader modules.
///
/// Immutable once compiled.
pub struct ShaderProgram {
    label: String,
    interface: ShaderInterface,
    vertex_module: wgpu::ShaderModule,
    fragment_module: wgpu::ShaderModule,
}

impl ShaderProgram {
    /// Compiles, validates and links both stages, then creates the modules.
    pub fn compile(
        device: &wgpu::Device,
        label: &str,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, ShaderError> {
        let interface = ShaderInterface::link(vertex_src, fragment_src)?;

        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{label} vertex")),
            source: wgpu::ShaderSource::Wgsl(vertex_src.into()),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{label} fragment")),
            source: wgpu::ShaderSource::Wgsl(fragment_src.into()),
        });

        let mut attrs: Vec<_> = interface.attributes.keys().map(String::as_str).collect();
        attrs.sort_unstable();
        let mut unis: Vec<_> = interface.uniforms.keys().map(String::as_str).collect();
        unis.sort_unstable();
        log::info!("shader program {label} linked: attributes {attrs:?}, uniforms {unis:?}");

        Ok(Self {
            label: label.to_string(),
            interface,
            vertex_module,
            fragment_module,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn interface(&self) -> &ShaderInterface {
        &self.interface
    }

    pub fn vertex_module(&self) -> &wgpu::ShaderModule {
        &self.vertex_module
    }

    pub fn fragment_module(&self) -> &wgpu::ShaderModule {
        &self.fragment_module
    }

    pub fn try_uniform(&self, name: &str) -> Option<UniformLocation> {
        self.interface.try_uniform(name)
    }

    pub fn try_attribute(&self, name: &str) -> Option<AttribLocation> {
        self.interface.try_attribute(name)
    }

    /// Resolves each uniform name; absent names map to `None`.
    pub fn resolve_uniforms<'n>(&self, names: &[&'n str]) -> HashMap<&'n str, Option<UniformLocation>> {
        resolve(&self.label, "uniform", names, |n| self.try_uniform(n))
    }

    /// Resolves each attribute name; absent names map to `None`.
    pub fn resolve_attributes<'n>(&self, names: &[&'n str]) -> HashMap<&'n str, Option<AttribLocation>> {
        resolve(&self.label, "attribute", names, |n| self.try_attribute(n))
    }
}

fn resolve<'n, T>(
    label: &str,
    what: &str,
    names: &[&'n str],
    lookup: impl Fn(&str) -> Option<T>,
) -> HashMap<&'n str, Option<T>> {
    let mut missing = HashSet::new();
    names
        .iter()
        .map(|&n| {
            let loc = lookup(n);
            if loc.is_none() && missing.insert(n) {
                log::debug!("shader program {label}: {what} `{n}` not found");
            }
            (n, loc)
        })
        .collect()
}
