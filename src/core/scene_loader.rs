// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::bakers::bounds::BoundsSeed;
use crate::bakers::pipeline::BakeSettings;
use crate::math::constants::{Float, Vector3f};
use crate::math::sh::{SHSample, SH_COEFFICIENTS};
use crate::math::transform::Transform;
use crate::probes::probe_group::ProbeGroup;
use crate::reducers::ReducerKind;
use crate::volumes::grid::GridMapping;
use crate::volumes::volume_texture::TextureFormat;

#[derive(Debug)]
pub enum SceneLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
}

impl From<std::io::Error> for SceneLoadError {
    fn from(err: std::io::Error) -> Self {
        SceneLoadError::Io(err)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "io error: {}", e),
            SceneLoadError::Parse(msg) => write!(f, "parse error: {}", msg),
            SceneLoadError::MissingField(field) => write!(f, "missing field: {}", field),
        }
    }
}

impl std::error::Error for SceneLoadError {}

pub struct SceneLoadResult {
    pub groups: Vec<ProbeGroup>,
    pub settings: BakeSettings,
    pub material: Option<String>,
    pub max_distance: Option<Float>,
    // inverse-distance exponent for the probe field
    pub power: Option<Float>,
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneLoadResult, SceneLoadError> {
    let xml = fs::read_to_string(path.as_ref())?;
    parse_scene(&xml)
}

struct PendingProbe {
    position: Vector3f,
    sh: SHSample,
}

#[derive(Default)]
struct LoaderState {
    groups: Vec<ProbeGroup>,
    current_group: Option<ProbeGroup>,
    current_probe: Option<PendingProbe>,
    in_group_transform: bool,
}

impl LoaderState {
    fn open_group(&mut self, name: Option<&String>) {
        let mut group = ProbeGroup::default();
        if let Some(name) = name {
            group = group.with_name(name.clone());
        }
        self.current_group = Some(group);
    }

    // Transform children apply in document order.
    fn transform_group(&mut self, f: impl FnOnce(&Transform) -> Transform) {
        if !self.in_group_transform {
            return;
        }
        if let Some(group) = self.current_group.as_mut() {
            group.to_world = f(&group.to_world);
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"transform" => self.in_group_transform = false,
            b"probe" => {
                if let (Some(probe), Some(group)) = (self.current_probe.take(), self.current_group.as_mut()) {
                    group.add_probe(probe.position, probe.sh);
                }
            }
            b"probegroup" => {
                if let Some(group) = self.current_group.take() {
                    self.groups.push(group);
                }
            }
            _ => {}
        }
    }
}

pub fn parse_scene(xml: &str) -> Result<SceneLoadResult, SceneLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut settings = BakeSettings::default();
    let mut reducer_type: Option<String> = None;
    let mut reducer_samples: Option<u32> = None;
    let mut material: Option<String> = None;
    let mut max_distance: Option<Float> = None;
    let mut power: Option<Float> = None;
    let mut state = LoaderState::default();

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(event) => event,
            Err(e) => {
                return Err(SceneLoadError::Parse(e.to_string()));
            }
        };

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let attrs = read_attributes(e, &defaults);
                match e.name().as_ref() {
                    b"default" => {
                        if let (Some(k), Some(v)) = (attrs.get("name"), attrs.get("value")) {
                            defaults.insert(k.clone(), v.clone());
                        }
                    }
                    b"bake" => apply_bake_attributes(&attrs, &mut settings)?,
                    b"reducer" => {
                        reducer_type = attrs.get("type").cloned();
                        if let Some(v) = attrs.get("samples") {
                            reducer_samples = Some(parse_u32(v)?);
                        }
                    }
                    b"field" => {
                        if let Some(v) = attrs.get("max_distance") {
                            max_distance = Some(parse_float(v)?);
                        }
                        if let Some(v) = attrs.get("power") {
                            let p = parse_float(v)?;
                            if !(p > 0.0 && p.is_finite()) {
                                return Err(SceneLoadError::Parse(format!("invalid field power: {}", v)));
                            }
                            power = Some(p);
                        }
                    }
                    b"material" => {
                        let name = attrs.get("name").ok_or(SceneLoadError::MissingField("material.name"))?;
                        material = Some(name.clone());
                    }
                    b"probegroup" => state.open_group(attrs.get("name")),
                    b"transform" => {
                        state.in_group_transform = state.current_group.is_some()
                            && attrs.get("name").map(|n| n == "to_world").unwrap_or(false);
                    }
                    b"translate" => {
                        let t = Vector3f::new(parse_optional_float(&attrs, "x", 0.0)?,
                                              parse_optional_float(&attrs, "y", 0.0)?,
                                              parse_optional_float(&attrs, "z", 0.0)?);
                        state.transform_group(|m| m.then_translate(&t));
                    }
                    b"scale" => {
                        let s = if let Some(u) = attrs.get("value") {
                            let u = parse_float(u)?;
                            Vector3f::new(u, u, u)
                        } else {
                            Vector3f::new(parse_optional_float(&attrs, "x", 1.0)?,
                                          parse_optional_float(&attrs, "y", 1.0)?,
                                          parse_optional_float(&attrs, "z", 1.0)?)
                        };
                        state.transform_group(|m| m.then_scale(&s));
                    }
                    b"probe" => {
                        if state.current_group.is_none() {
                            return Err(SceneLoadError::Parse("probe outside of probegroup".to_string()));
                        }
                        let position = attrs.get("position").ok_or(SceneLoadError::MissingField("probe.position"))?;
                        let sh = match attrs.get("rgb") {
                            Some(rgb) => SHSample::isotropic(parse_vec3(rgb)?),
                            None => SHSample::default(),
                        };
                        state.current_probe = Some(PendingProbe { position: parse_vec3(position)?, sh });
                    }
                    b"sh" => {
                        let probe = state.current_probe
                            .as_mut()
                            .ok_or_else(|| SceneLoadError::Parse("sh outside of probe".to_string()))?;
                        let channel = match attrs.get("channel").map(|c| c.as_str()) {
                            Some("r") => 0,
                            Some("g") => 1,
                            Some("b") => 2,
                            Some(other) => return Err(SceneLoadError::Parse(format!("unknown sh channel: {}", other))),
                            None => return Err(SceneLoadError::MissingField("sh.channel")),
                        };
                        let value = attrs.get("value").ok_or(SceneLoadError::MissingField("sh.value"))?;
                        probe.sh.coefficients[channel] = parse_sh_row(value)?;
                    }
                    _ => {}
                }

                if matches!(event, Event::Empty(_)) {
                    state.close(e.name().as_ref());
                }
            }
            Event::End(ref e) => state.close(e.name().as_ref()),
            _ => {}
        }

        buf.clear();
    }

    if let Some(kind) = reducer_type {
        settings.reducer = ReducerKind::parse(&kind, reducer_samples)
            .ok_or_else(|| SceneLoadError::Parse(format!("unsupported reducer: {}", kind)))?;
    }

    Ok(SceneLoadResult {
        groups: state.groups,
        settings,
        material,
        max_distance,
        power,
    })
}

fn apply_bake_attributes(attrs: &HashMap<String, String>, settings: &mut BakeSettings) -> Result<(), SceneLoadError> {
    for (key, value) in attrs {
        match key.as_str() {
            "resolution" => settings.resolution = parse_usize(value)?,
            "padding" => settings.padding = parse_float(value)?,
            "seed" => settings.seed = parse_u64(value)?,
            "mips" => settings.generate_mips = parse_bool(value)?,
            "mapping" => {
                settings.mapping = GridMapping::parse(value)
                    .ok_or_else(|| SceneLoadError::Parse(format!("unsupported mapping: {}", value)))?;
            }
            "format" => {
                settings.format = TextureFormat::parse(value)
                    .ok_or_else(|| SceneLoadError::Parse(format!("unsupported format: {}", value)))?;
            }
            "bounds_seed" => {
                settings.bounds_seed = BoundsSeed::parse(value)
                    .ok_or_else(|| SceneLoadError::Parse(format!("unsupported bounds seed: {}", value)))?;
            }
            _ => log::warn!("Ignoring unknown bake attribute: {}", key),
        }
    }
    Ok(())
}

fn read_attributes(e: &BytesStart, defaults: &HashMap<String, String>) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = resolve_value(&attr.unescape_value().unwrap_or_default(), defaults);
        out.insert(key, value);
    }
    out
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

fn parse_float(value: &str) -> Result<Float, SceneLoadError> {
    value.trim().parse::<Float>().map_err(|_| SceneLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_u32(value: &str) -> Result<u32, SceneLoadError> {
    value.trim().parse::<u32>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_u64(value: &str) -> Result<u64, SceneLoadError> {
    value.trim().parse::<u64>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_usize(value: &str) -> Result<usize, SceneLoadError> {
    value.trim().parse::<usize>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_optional_float(attrs: &HashMap<String, String>, key: &str, default: Float) -> Result<Float, SceneLoadError> {
    match attrs.get(key) {
        Some(v) => parse_float(v),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Result<bool, SceneLoadError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(SceneLoadError::Parse(format!("invalid boolean: {}", value))),
    }
}

fn parse_floats(value: &str) -> Result<Vec<Float>, SceneLoadError> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_float)
        .collect()
}

fn parse_vec3(value: &str) -> Result<Vector3f, SceneLoadError> {
    let v = parse_floats(value)?;
    if v.len() != 3 {
        return Err(SceneLoadError::Parse(format!("invalid vec3: {}", value)));
    }
    Ok(Vector3f::new(v[0], v[1], v[2]))
}

fn parse_sh_row(value: &str) -> Result<[Float; SH_COEFFICIENTS], SceneLoadError> {
    let v = parse_floats(value)?;
    if v.len() != SH_COEFFICIENTS {
        return Err(SceneLoadError::Parse(format!(
            "expected {} sh coefficients, got {}", SH_COEFFICIENTS, v.len())));
    }
    let mut row = [0.0; SH_COEFFICIENTS];
    row.copy_from_slice(&v);
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"
        <scene>
            <default name="res" value="8"/>
            <bake resolution="$res" padding="0.25" seed="7" mips="false"
                  mapping="exclusive" format="rgba16f" bounds_seed="first_point"/>
            <reducer type="directional" samples="32"/>
            <field max_distance="12.5" power="3"/>
            <material name="volumetric_fog"/>
            <probegroup name="hall">
                <transform name="to_world">
                    <scale value="2"/>
                    <translate x="1" y="0" z="-3"/>
                </transform>
                <probe position="0, 0, 0" rgb="1 0.5 0.25"/>
                <probe position="1 2 3">
                    <sh channel="r" value="1 0 0 0 0 0 0 0 0"/>
                    <sh channel="g" value="0.5, 0.1, 0, 0, 0, 0, 0, 0, 0"/>
                    <sh channel="b" value="0 0 0 0 0 0 0 0 0.3"/>
                </probe>
            </probegroup>
            <probegroup>
                <probe position="-4 0 0"/>
            </probegroup>
        </scene>
    "#;

    #[test]
    fn loader_reads_bake_settings() {
        let result = parse_scene(SCENE).unwrap();
        let s = &result.settings;
        assert_eq!(s.resolution, 8);
        assert!((s.padding - 0.25).abs() < 1e-6);
        assert_eq!(s.seed, 7);
        assert!(!s.generate_mips);
        assert_eq!(s.mapping, GridMapping::Exclusive);
        assert_eq!(s.format, TextureFormat::Rgba16Float);
        assert_eq!(s.bounds_seed, BoundsSeed::FirstPoint);
        assert_eq!(s.reducer, ReducerKind::Directional { samples: 32 });
        assert_eq!(result.material.as_deref(), Some("volumetric_fog"));
        assert_eq!(result.max_distance, Some(12.5));
        assert_eq!(result.power, Some(3.0));
    }

    #[test]
    fn loader_reads_probe_groups() {
        let result = parse_scene(SCENE).unwrap();
        assert_eq!(result.groups.len(), 2);

        let hall = &result.groups[0];
        assert_eq!(hall.name.as_deref(), Some("hall"));
        assert_eq!(hall.len(), 2);
        let world: Vec<Vector3f> = hall.world_positions().collect();
        assert_eq!(world[0], Vector3f::new(1.0, 0.0, -3.0));
        assert_eq!(world[1], Vector3f::new(3.0, 4.0, 3.0));

        let probes: Vec<(Vector3f, SHSample)> = hall.world_probes().collect();
        assert_eq!(probes[0].1.dc(), Vector3f::new(1.0, 0.5, 0.25));
        assert_eq!(probes[1].1.coefficients[1][1], 0.1);
        assert_eq!(probes[1].1.coefficients[2][8], 0.3);

        let second = &result.groups[1];
        assert_eq!(second.len(), 1);
        assert!(probes_are_black(second));
    }

    #[test]
    fn loader_applies_transforms_in_document_order() {
        let xml = r#"
            <scene>
                <probegroup>
                    <transform name="to_world">
                        <translate x="1"/>
                        <scale value="2"/>
                    </transform>
                    <probe position="1 1 1"/>
                </probegroup>
                <probegroup>
                    <transform name="to_world">
                        <scale value="2"/>
                        <translate x="1"/>
                    </transform>
                    <probe position="1 1 1"/>
                </probegroup>
            </scene>
        "#;
        let result = parse_scene(xml).unwrap();
        let translate_first: Vec<Vector3f> = result.groups[0].world_positions().collect();
        let scale_first: Vec<Vector3f> = result.groups[1].world_positions().collect();
        assert_eq!(translate_first[0], Vector3f::new(4.0, 2.0, 2.0));
        assert_eq!(scale_first[0], Vector3f::new(3.0, 2.0, 2.0));
    }

    fn probes_are_black(group: &ProbeGroup) -> bool {
        group.world_probes().all(|(_, sh)| sh.is_zero())
    }

    #[test]
    fn loader_defaults_without_bake_element() {
        let result = parse_scene("<scene><probegroup/></scene>").unwrap();
        assert_eq!(result.settings, BakeSettings::default());
        assert_eq!(result.groups.len(), 1);
        assert!(result.groups[0].is_empty());
        assert!(result.material.is_none());
    }

    #[test]
    fn loader_rejects_bad_input() {
        assert!(matches!(parse_scene(r#"<scene><probe position="0 0 0"/></scene>"#),
                         Err(SceneLoadError::Parse(_))));
        assert!(matches!(parse_scene(r#"<scene><probegroup><probe/></probegroup></scene>"#),
                         Err(SceneLoadError::MissingField("probe.position"))));
        assert!(matches!(parse_scene(r#"<scene><bake format="bc6h"/></scene>"#),
                         Err(SceneLoadError::Parse(_))));
        assert!(matches!(parse_scene(r#"<scene><reducer type="median"/></scene>"#),
                         Err(SceneLoadError::Parse(_))));
        assert!(matches!(parse_scene(r#"<scene><field power="0"/></scene>"#),
                         Err(SceneLoadError::Parse(_))));
        let short_row = r#"<scene><probegroup><probe position="0 0 0">
                               <sh channel="r" value="1 2 3"/>
                           </probe></probegroup></scene>"#;
        assert!(matches!(parse_scene(short_row), Err(SceneLoadError::Parse(_))));
    }
}
