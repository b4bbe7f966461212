//! Scene file loader.
//!
//! The format is line oriented: a keyword on its own line, followed by a fixed
//! number of parameter lines. Blank lines and lines starting with `#` are
//! skipped everywhere. Vectors and colors are three whitespace-separated
//! numbers; table references are 1-based.
//!
//! ```text
//! Camera
//! -2 0 2        # look from
//! 0 1 0         # up
//! 0 0 0         # look at
//! 40            # vfov (degrees)
//! 0.02          # lens radius
//! 4             # focus distance
//! 0             # shutter open
//! 1             # shutter close
//! BVH
//! Lambertian
//! 0.7 0.3 0.3
//! Sphere
//! 0 0 0
//! 0.5
//! 1
//! ```
//!
//! A malformed entity is logged and skipped; parsing never aborts. Only
//! failing to read the file at all is an error.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use ember_math::{Point3, Vec3};
use thiserror::Error;

use crate::scene::{CameraDesc, MaterialDesc, ObjectDesc, RectAxis, SceneDescription, TextureDesc};

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Load and parse a scene file.
///
/// Relative image-texture paths are resolved against the scene file's
/// directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Reading scene {}", path.display());
    let mut scene = parse_scene(&content);

    if let Some(base) = path.parent() {
        for texture in &mut scene.textures {
            if let TextureDesc::Image { path: image_path } = texture {
                if Path::new(image_path.as_str()).is_relative() {
                    *image_path = base.join(image_path.as_str()).to_string_lossy().into_owned();
                }
            }
        }
    }

    log::info!(
        "Scene loaded: {} textures, {} materials, {} objects, bvh={}",
        scene.textures.len(),
        scene.materials.len(),
        scene.objects.len(),
        scene.use_bvh
    );
    Ok(scene)
}

/// Parse scene text. Problems are logged as warnings and the offending entity
/// is dropped.
pub fn parse_scene(content: &str) -> SceneDescription {
    SceneParser::new(content).parse()
}

type EntityResult<T> = Result<T, String>;

struct SceneParser {
    lines: VecDeque<(usize, String)>,
    scene: SceneDescription,
}

impl SceneParser {
    fn new(content: &str) -> Self {
        let lines = content
            .lines()
            .enumerate()
            .map(|(i, s)| (i + 1, s.trim().to_string()))
            .filter(|(_, s)| !s.is_empty() && !s.starts_with('#'))
            .collect();

        Self {
            lines,
            scene: SceneDescription::default(),
        }
    }

    fn parse(mut self) -> SceneDescription {
        while let Some((line_num, line)) = self.lines.pop_front() {
            let keyword = strip_comment(&line).to_string();
            let result = match keyword.as_str() {
                "BVH" => {
                    self.scene.use_bvh = true;
                    Ok(())
                }
                "Camera" => self.parse_camera(),
                "Background" => self.parse_background(),
                "Solid" | "Checker" | "Noise" | "Image" => self.parse_texture(&keyword),
                "Lambertian" | "LambertianTex" | "Metal" | "Dielectrics" | "DiffuseLight"
                | "DiffuseLightTex" => self.parse_material(&keyword),
                "Sphere" | "MovingSphere" | "XYRect" | "XZRect" | "YZRect" => {
                    self.parse_object(&keyword)
                }
                other => Err(format!("unknown keyword {other:?}")),
            };

            if let Err(message) = result {
                log::warn!("Scene line {}: {} entry skipped: {}", line_num, keyword, message);
            }
        }

        self.scene
    }

    /// Take the next `count` parameter lines.
    fn params(&mut self, count: usize) -> EntityResult<Vec<String>> {
        let mut params = Vec::with_capacity(count);
        for i in 0..count {
            match self.lines.pop_front() {
                Some((_, line)) => params.push(strip_comment(&line).to_string()),
                None => {
                    return Err(format!(
                        "unexpected end of file, expected {} parameter lines, found {}",
                        count, i
                    ))
                }
            }
        }
        Ok(params)
    }

    fn parse_camera(&mut self) -> EntityResult<()> {
        let p = self.params(8)?;
        self.scene.camera = Some(CameraDesc {
            look_from: parse_vec3(&p[0])?,
            vup: parse_vec3(&p[1])?,
            look_at: parse_vec3(&p[2])?,
            vfov: parse_f64(&p[3])?,
            lens_radius: parse_f64(&p[4])?,
            focus_dist: parse_f64(&p[5])?,
            time0: parse_f64(&p[6])?,
            time1: parse_f64(&p[7])?,
        });
        Ok(())
    }

    fn parse_background(&mut self) -> EntityResult<()> {
        let p = self.params(1)?;
        self.scene.background = Some(parse_vec3(&p[0])?);
        Ok(())
    }

    fn parse_texture(&mut self, keyword: &str) -> EntityResult<()> {
        let texture_count = self.scene.textures.len();
        let texture = match keyword {
            "Solid" => {
                let p = self.params(1)?;
                TextureDesc::Solid(parse_vec3(&p[0])?)
            }
            "Checker" => {
                let p = self.params(2)?;
                TextureDesc::Checker {
                    even: parse_index(&p[0], texture_count, "texture")?,
                    odd: parse_index(&p[1], texture_count, "texture")?,
                }
            }
            "Noise" => {
                let p = self.params(2)?;
                TextureDesc::Noise {
                    scale: parse_f64(&p[0])?,
                    color: parse_vec3(&p[1])?,
                }
            }
            _ => {
                let p = self.params(1)?;
                if p[0].is_empty() {
                    return Err("empty image path".to_string());
                }
                TextureDesc::Image { path: p[0].clone() }
            }
        };
        self.scene.textures.push(texture);
        Ok(())
    }

    fn parse_material(&mut self, keyword: &str) -> EntityResult<()> {
        let texture_count = self.scene.textures.len();
        let material = match keyword {
            "Lambertian" => {
                let p = self.params(1)?;
                MaterialDesc::Lambertian(parse_vec3(&p[0])?)
            }
            "LambertianTex" => {
                let p = self.params(1)?;
                MaterialDesc::LambertianTexture(parse_index(&p[0], texture_count, "texture")?)
            }
            "Metal" => {
                let p = self.params(2)?;
                MaterialDesc::Metal {
                    albedo: parse_vec3(&p[0])?,
                    fuzz: parse_f64(&p[1])?,
                }
            }
            "Dielectrics" => {
                let p = self.params(1)?;
                MaterialDesc::Dielectric {
                    ior: parse_f64(&p[0])?,
                }
            }
            "DiffuseLight" => {
                let p = self.params(1)?;
                MaterialDesc::DiffuseLight(parse_vec3(&p[0])?)
            }
            _ => {
                let p = self.params(1)?;
                MaterialDesc::DiffuseLightTexture(parse_index(&p[0], texture_count, "texture")?)
            }
        };
        self.scene.materials.push(material);
        Ok(())
    }

    fn parse_object(&mut self, keyword: &str) -> EntityResult<()> {
        let material_count = self.scene.materials.len();
        let object = match keyword {
            "Sphere" => {
                let p = self.params(3)?;
                ObjectDesc::Sphere {
                    center: parse_vec3(&p[0])?,
                    radius: parse_f64(&p[1])?,
                    material: parse_index(&p[2], material_count, "material")?,
                }
            }
            "MovingSphere" => {
                let p = self.params(6)?;
                ObjectDesc::MovingSphere {
                    center0: parse_vec3(&p[0])?,
                    center1: parse_vec3(&p[1])?,
                    radius: parse_f64(&p[2])?,
                    time0: parse_f64(&p[3])?,
                    time1: parse_f64(&p[4])?,
                    material: parse_index(&p[5], material_count, "material")?,
                }
            }
            _ => {
                let axis = match keyword {
                    "XYRect" => RectAxis::Z,
                    "XZRect" => RectAxis::Y,
                    _ => RectAxis::X,
                };
                let p = self.params(4)?;
                ObjectDesc::Rect {
                    axis,
                    a: parse_pair(&p[0])?,
                    b: parse_pair(&p[1])?,
                    k: parse_f64(&p[2])?,
                    material: parse_index(&p[3], material_count, "material")?,
                }
            }
        };
        self.scene.objects.push(object);
        Ok(())
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => line[..i].trim(),
        None => line.trim(),
    }
}

fn parse_numbers<const N: usize>(line: &str) -> EntityResult<[f64; N]> {
    let mut values = [0.0; N];
    let mut tokens = line.split_whitespace();
    for value in values.iter_mut() {
        let token = tokens
            .next()
            .ok_or_else(|| format!("expected {} numbers in {:?}", N, line))?;
        *value = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("bad number {:?}", token))?;
    }
    if let Some(extra) = tokens.next() {
        return Err(format!("unexpected token {:?} in {:?}", extra, line));
    }
    Ok(values)
}

fn parse_f64(line: &str) -> EntityResult<f64> {
    let [v] = parse_numbers::<1>(line)?;
    Ok(v)
}

fn parse_pair(line: &str) -> EntityResult<(f64, f64)> {
    let [a, b] = parse_numbers::<2>(line)?;
    Ok((a, b))
}

fn parse_vec3(line: &str) -> EntityResult<Vec3> {
    let [x, y, z] = parse_numbers::<3>(line)?;
    Ok(Point3::new(x, y, z))
}

/// Parse a 1-based table reference into a checked 0-based index.
fn parse_index(line: &str, len: usize, table: &str) -> EntityResult<usize> {
    let token = line.trim();
    let index = token
        .parse::<usize>()
        .map_err(|_| format!("bad {} index {:?}", table, token))?;
    if index == 0 || index > len {
        return Err(format!("{} index {} out of range (1..={})", table, index, len));
    }
    Ok(index - 1)
}
