//! Integration tests for RFX crates.
//!
//! This crate contains end-to-end tests that verify the catalog, the graph
//! model and the CPU renderer together.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use glam::Vec2;
    use rfx_core::pattern::Pattern;
    use rfx_core::{RgbaImage, TileMode};
    use rfx_graph::{
        effects, resolve, resolve_name, resolve_with, Capabilities, ColorMatrix, EffectCatalog,
        EffectId, FilterGraph, FilterNode, ProgramKind, RuntimeShader,
    };
    use rfx_ops::kernel::compile;
    use rfx_ops::{FragmentKernel, ProbeSampler, RenderConfig, Renderer};

    fn kernel_for(id: EffectId) -> Box<dyn FragmentKernel> {
        match resolve(id).root() {
            Some(FilterNode::Shader(s)) => compile(s).unwrap(),
            other => panic!("{id}: expected shader, got {other:?}"),
        }
    }

    fn matrix_for(id: EffectId) -> ColorMatrix {
        match resolve(id).root() {
            Some(FilterNode::ColorMatrix(m)) => *m,
            other => panic!("{id}: expected color matrix, got {other:?}"),
        }
    }

    /// Taps a kernel makes for one destination coordinate.
    fn taps(id: EffectId, coord: Vec2) -> (Vec<Vec2>, [f32; 4]) {
        let probe = ProbeSampler::new([0.2, 0.4, 0.6, 0.3]);
        let out = kernel_for(id).shade(coord, &probe);
        (probe.taps(), out)
    }

    #[test]
    fn test_every_effect_but_none_is_non_empty() {
        for id in EffectId::ALL {
            let graph = resolve(id);
            assert_eq!(graph.is_identity(), id == EffectId::None, "{id}");
        }
        assert!(resolve_name("Kaleidoscope").is_identity());
        assert!(resolve_name("").is_identity());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        for id in EffectId::ALL {
            assert_eq!(resolve(id), resolve(id), "{id}");
            let a = serde_json::to_string(&resolve(id)).unwrap();
            let b = serde_json::to_string(&resolve(id)).unwrap();
            assert_eq!(a, b, "{id}");
        }
    }

    #[test]
    fn test_names_and_ids_agree() {
        for id in EffectId::ALL {
            assert_eq!(resolve_name(id.name()), resolve(id), "{id}");
        }
    }

    #[test]
    fn test_grayscale_saturation_is_zero() {
        assert_eq!(matrix_for(EffectId::Grayscale).saturation_term(), Some(0.0));
    }

    #[test]
    fn test_invert_black_and_white() {
        let m = matrix_for(EffectId::Invert);
        assert_eq!(m.apply_rgba8([255, 255, 255, 255]), [0, 0, 0, 255]);
        assert_eq!(m.apply_rgba8([0, 0, 0, 255]), [255, 255, 255, 255]);

        let img = RgbaImage::filled(3, 3, [1.0, 1.0, 1.0, 1.0]).unwrap();
        let out = Renderer::default().render(&resolve(EffectId::Invert), &img).unwrap();
        assert!(out.pixels().all(|px| px == [0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_sepia_coefficients() {
        let m = matrix_for(EffectId::Sepia);
        assert_eq!(m.row(0), [0.393, 0.769, 0.189, 0.0, 0.0]);
        assert_eq!(m.row(1), [0.349, 0.686, 0.168, 0.0, 0.0]);
        assert_eq!(m.row(2), [0.272, 0.534, 0.131, 0.0, 0.0]);
        assert_eq!(m.row(3), [0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_pixelate_snaps_to_block() {
        let (t, _) = taps(EffectId::Pixelate, Vec2::new(17.0, 5.0));
        assert_eq!(t, vec![Vec2::new(12.0, 0.0)]);
    }

    #[test]
    fn test_chromatic_aberration_taps() {
        let (t, out) = taps(EffectId::ChromaticAberration, Vec2::new(100.0, 50.0));
        assert_eq!(
            t,
            vec![Vec2::new(105.0, 50.0), Vec2::new(100.0, 50.0), Vec2::new(95.0, 50.0)]
        );
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_swirl_center_unmoved() {
        let (t, _) = taps(EffectId::SwirlDistortion, Vec2::new(125.0, 125.0));
        assert_abs_diff_eq!(t[0].x, 125.0, epsilon = 1e-5);
        assert_abs_diff_eq!(t[0].y, 125.0, epsilon = 1e-5);
    }

    #[test]
    fn test_swirl_direction() {
        // 100px right of center, angle 0.75 rad
        let (t, _) = taps(EffectId::SwirlDistortion, Vec2::new(225.0, 125.0));
        assert_abs_diff_eq!(t[0].x, 198.169, epsilon = 1e-2);
        assert_abs_diff_eq!(t[0].y, 56.836, epsilon = 1e-2);
    }

    #[test]
    fn test_wave_displacement() {
        let (t, _) = taps(EffectId::WaveDistortion, Vec2::new(60.0, 0.0));
        assert_eq!(t, vec![Vec2::new(60.0, 0.0)]);

        for y in [10.0f32, 125.0, 333.0] {
            let (t, _) = taps(EffectId::WaveDistortion, Vec2::new(60.0, y));
            let expected = (y / 500.0 * 8.0).sin() * 20.0;
            assert_abs_diff_eq!(t[0].x - 60.0, expected, epsilon = 1e-3);
            assert_eq!(t[0].y, y);
        }
    }

    #[test]
    fn test_chain_equals_sequential_application() {
        let src = Pattern::CHECKER.render(40, 40).unwrap();
        let blur = effects::blur(6.0, 6.0, TileMode::Clamp).unwrap();
        let sepia = effects::sepia();
        let r = Renderer::default();

        let chained = r
            .render(&FilterGraph::new(FilterNode::chain(sepia.clone(), blur.clone())), &src)
            .unwrap();
        let blurred = r.render(&FilterGraph::new(blur), &src).unwrap();
        let manual = r.render(&FilterGraph::new(sepia), &blurred).unwrap();
        assert_eq!(chained, manual);
    }

    #[test]
    fn test_chain_preset_structure() {
        let graph = resolve_name("Chain (Blur + Red Tint)");
        let stages = graph.stages();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].kind(), "blur");
        assert_eq!(stages[1].kind(), "blend_color");
    }

    #[test]
    fn test_identity_render() {
        let src = Pattern::Gradient.render(33, 17).unwrap();
        let out = Renderer::default().render(&FilterGraph::identity(), &src).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_capability_gate() {
        for id in EffectId::ALL {
            let gated = resolve_with(id, Capabilities::PRIMITIVES_ONLY);
            if id.requires_runtime_shader() {
                assert!(gated.is_identity(), "{id}");
            } else {
                assert_eq!(gated, resolve(id), "{id}");
            }
        }
        let catalog = EffectCatalog::with_capabilities(Capabilities::PRIMITIVES_ONLY);
        assert!(catalog.iter().all(|(_, g)| !g.uses_runtime_shader()));
    }

    #[test]
    fn test_parameter_validation() {
        assert!(effects::blur(-1.0, 0.0, TileMode::Clamp).is_err());
        assert!(effects::pixelate(0.0).is_err());
        assert!(effects::offset(f32::NAN, 0.0).is_err());
        assert!(effects::wave(1.0, 8.0, Vec2::new(0.0, 500.0)).is_err());
        let mut shader = RuntimeShader::builtin(ProgramKind::Swirl);
        assert!(shader.set_float("strength", f32::INFINITY).is_err());
    }

    #[test]
    fn test_parallel_and_serial_agree() {
        let src = Pattern::Gradient.render(80, 50).unwrap();
        let serial = Renderer::new(RenderConfig { parallel: false, ..Default::default() });
        let parallel = Renderer::default();
        for id in EffectId::ALL {
            let g = resolve(id);
            assert_eq!(serial.render(&g, &src).unwrap(), parallel.render(&g, &src).unwrap(), "{id}");
        }
    }

    #[test]
    fn test_graph_json_shape() {
        let json = serde_json::to_value(resolve(EffectId::Blur)).unwrap();
        assert_eq!(json["type"], "blur");
        assert_eq!(json["radius_x"], 25.0);
        assert_eq!(json["edge_mode"], "clamp");
        assert!(serde_json::to_value(FilterGraph::identity()).unwrap().is_null());
    }
}
