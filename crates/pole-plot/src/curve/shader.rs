use naga::{AddressSpace, Binding, ShaderStage, TypeInner, VectorSize};

use crate::error::{PlotError, Result};

use super::uniform::CurveUniform;

pub const CURVE_SHADER: &str = include_str!("shaders/curve.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Parses and validates WGSL on the CPU.
///
/// wgpu reports shader errors asynchronously through the device error
/// callback; running naga up front gives a synchronous, printable
/// diagnostic instead.
pub fn validate_wgsl(source: &str) -> Result<()> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| PlotError::Initialization(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| PlotError::Initialization(e.emit_to_string(source)))?;

    check_pipeline_interface(&module)
}

/// Checks a valid module against the curve pipeline layout: `vs_main` taking
/// only `@location(0) vec2<f32>`, `fs_main` writing `@location(0)`, and no
/// resource other than the uniform at `@group(0) @binding(0)`.
fn check_pipeline_interface(module: &naga::Module) -> Result<()> {
    let link = |msg: String| PlotError::Initialization(format!("curve shader link: {msg}"));

    let entry = |stage: ShaderStage, name: &str| {
        module
            .entry_points
            .iter()
            .find(|ep| ep.stage == stage && ep.name == name)
            .ok_or_else(|| link(format!("missing {stage:?} entry point `{name}`")))
    };
    let vs = entry(ShaderStage::Vertex, VERTEX_ENTRY)?;
    let fs = entry(ShaderStage::Fragment, FRAGMENT_ENTRY)?;

    for arg in &vs.function.arguments {
        let bindings: Vec<(&Option<Binding>, naga::Handle<naga::Type>)> =
            match (&arg.binding, &module.types[arg.ty].inner) {
                (None, TypeInner::Struct { members, .. }) => {
                    members.iter().map(|m| (&m.binding, m.ty)).collect()
                }
                _ => vec![(&arg.binding, arg.ty)],
            };
        for (binding, ty) in bindings {
            let Some(Binding::Location { location, .. }) = binding else { continue };
            let is_vec2f = matches!(
                module.types[ty].inner,
                TypeInner::Vector { size: VectorSize::Bi, scalar } if scalar == naga::Scalar::F32
            );
            if *location != 0 || !is_vec2f {
                return Err(link(format!(
                    "vertex input @location({location}) does not match the vec2<f32> quad buffer"
                )));
            }
        }
    }

    let writes_color = fs.function.result.as_ref().is_some_and(|r| match &r.binding {
        Some(Binding::Location { location, .. }) => *location == 0,
        None => match &module.types[r.ty].inner {
            TypeInner::Struct { members, .. } => members
                .iter()
                .any(|m| matches!(m.binding, Some(Binding::Location { location: 0, .. }))),
            _ => false,
        },
        _ => false,
    });
    if !writes_color {
        return Err(link(format!("`{FRAGMENT_ENTRY}` does not write @location(0)")));
    }

    let uniform_size = std::mem::size_of::<CurveUniform>() as u32;
    for (_, var) in module.global_variables.iter() {
        let Some(rb) = &var.binding else { continue };
        if rb.group != 0 || rb.binding != 0 {
            return Err(link(format!(
                "unexpected resource at @group({}) @binding({})",
                rb.group, rb.binding
            )));
        }
        if var.space != AddressSpace::Uniform {
            return Err(link("@group(0) @binding(0) is not a uniform buffer".to_string()));
        }
        let size = module.types[var.ty].inner.size(module.to_ctx());
        if size > uniform_size {
            return Err(link(format!(
                "uniform block is {size} bytes, the buffer holds {uniform_size}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_shader_validates() {
        if let Err(e) = validate_wgsl(CURVE_SHADER) {
            panic!("{e}");
        }
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = validate_wgsl("fn broken( {").unwrap_err();
        assert!(matches!(err, PlotError::Initialization(ref msg) if !msg.is_empty()));
    }

    // ── pipeline interface ─────────────────────────────────────────────────

    #[test]
    fn missing_entry_points_are_rejected() {
        let src = "@fragment fn other() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        let err = validate_wgsl(src).unwrap_err();
        assert!(matches!(err, PlotError::Initialization(ref msg) if msg.contains("vs_main")));
    }

    #[test]
    fn wrong_vertex_input_is_rejected() {
        let src = "
            @vertex fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(p, 1.0);
            }
            @fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }
        ";
        assert!(validate_wgsl(src).is_err());
    }

    #[test]
    fn extra_binding_is_rejected() {
        let src = "
            @group(1) @binding(0) var<uniform> k: vec4<f32>;
            @vertex fn vs_main(@location(0) p: vec2<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(p, 0.0, 1.0) * k.x;
            }
            @fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }
        ";
        assert!(validate_wgsl(src).is_err());
    }

    #[test]
    fn oversized_uniform_is_rejected() {
        let src = "
            struct Big { m: array<mat4x4<f32>, 8> };
            @group(0) @binding(0) var<uniform> u: Big;
            @vertex fn vs_main(@location(0) p: vec2<f32>) -> @builtin(position) vec4<f32> {
                return u.m[0] * vec4<f32>(p, 0.0, 1.0);
            }
            @fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }
        ";
        assert!(validate_wgsl(src).is_err());
    }

    #[test]
    fn minimal_matching_shader_is_accepted() {
        let src = "
            @vertex fn vs_main(@location(0) p: vec2<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(p, 0.0, 1.0);
            }
            @fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }
        ";
        if let Err(e) = validate_wgsl(src) {
            panic!("{e}");
        }
    }

    #[test]
    fn type_error_is_reported() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
        assert!(validate_wgsl(src).is_err());
    }
}
