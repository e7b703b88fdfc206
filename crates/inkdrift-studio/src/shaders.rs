//! WGSL sources for the layer program.

pub const LAYER_VERTEX: &str = include_str!("../shaders/quad.vert.wgsl");
pub const LAYER_FRAGMENT: &str = include_str!("../shaders/quad.frag.wgsl");

#[cfg(test)]
mod tests {
    use super::*;
    use inkdrift_engine::render::{ShaderInterface, LAYER_ATTRIBUTES, LAYER_UNIFORMS};

    #[test]
    fn layer_program_links() {
        ShaderInterface::link(LAYER_VERTEX, LAYER_FRAGMENT).unwrap();
    }

    #[test]
    fn layer_program_declares_every_expected_name() {
        let iface = ShaderInterface::link(LAYER_VERTEX, LAYER_FRAGMENT).unwrap();
        for name in LAYER_ATTRIBUTES {
            assert!(iface.try_attribute(name).is_some(), "attribute {name}");
        }
        for name in LAYER_UNIFORMS {
            assert!(iface.try_uniform(name).is_some(), "uniform {name}");
        }
    }
}
