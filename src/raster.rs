//! Single band GeoTIFF reading and writing.
//!
//! Only the GeoTIFF tags needed to carry a DEM (or a grid derived from one) through
//! a round trip are handled: pixel scale, tie point, the GeoKey directory, the
//! GeoASCII parameters and GDAL's no-data tag.
use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ndarray::Array2;
use num::NumCast;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{self, ColorType};
use tiff::encoder::{TiffEncoder, TiffValue};
use tiff::tags::Tag;

use crate::error::{Error, Result};

const PROJECTED_CS_TYPE_GEO_KEY: u64 = 3072;
const GEOGRAPHIC_TYPE_GEO_KEY: u64 = 2048;

/// Cell types that can be stored in a GeoTIFF.
pub trait RasterSample: Copy + NumCast + Display + Send + Sync + 'static {
    type Colour: ColorType<Inner = Self>;
}

macro_rules! raster_sample {
    ($t:ty, $c:ty) => {
        impl RasterSample for $t {
            type Colour = $c;
        }
    };
}

raster_sample!(u8, colortype::Gray8);
raster_sample!(u16, colortype::Gray16);
raster_sample!(i16, colortype::GrayI16);
raster_sample!(i32, colortype::GrayI32);
raster_sample!(f32, colortype::Gray32Float);
raster_sample!(f64, colortype::Gray64Float);

fn cast_all<S: NumCast, T: NumCast>(buf: Vec<S>) -> Result<Vec<T>> {
    buf.into_iter()
        .map(|v| num::cast::<S, T>(v).ok_or(Error::SampleCast))
        .collect()
}

fn decoded_to_vec<T: NumCast>(decoded: DecodingResult) -> Result<Vec<T>> {
    match decoded {
        DecodingResult::U8(buf) => cast_all(buf),
        DecodingResult::U16(buf) => cast_all(buf),
        DecodingResult::U32(buf) => cast_all(buf),
        DecodingResult::U64(buf) => cast_all(buf),
        DecodingResult::I8(buf) => cast_all(buf),
        DecodingResult::I16(buf) => cast_all(buf),
        DecodingResult::I32(buf) => cast_all(buf),
        DecodingResult::I64(buf) => cast_all(buf),
        DecodingResult::F32(buf) => cast_all(buf),
        DecodingResult::F64(buf) => cast_all(buf),
    }
}

/// EPSG code from a GeoKey directory, 0 when it has none.
///
/// The directory is a 4 value header followed by 4 values per key: id, location,
/// count, value. Only keys stored inline (location 0) are considered.
fn crs_from_geokeys(gdir: &[u64]) -> u16 {
    let keys: Vec<&[u64]> = gdir.get(4..).unwrap_or_default().chunks_exact(4).collect();
    [PROJECTED_CS_TYPE_GEO_KEY, GEOGRAPHIC_TYPE_GEO_KEY]
        .iter()
        .find_map(|&id| {
            keys.iter()
                .find(|k| k[0] == id && k[1] == 0)
                .and_then(|k| u16::try_from(k[3]).ok())
        })
        .unwrap_or(0)
}

/// Reads a single band GeoTIFF.
///
/// Returns the data, its no-data value, the EPSG code, a GDAL style geotransform
/// `[x_origin, x_res, 0, y_origin, 0, y_res]`, the GeoKey directory and the
/// GeoASCII parameters. Samples are cast to `T`, failing if any does not fit.
#[allow(clippy::type_complexity)]
pub fn rasterfile_to_array<T: RasterSample>(
    fname: &Path
) -> Result<(Array2<T>, T, u16, [f64; 6], Vec<u64>, String)>
{
    log::debug!("Reading raster {}", fname.display());
    let mut decoder = Decoder::new(BufReader::new(File::open(fname)?))?;
    let (width, height) = decoder.dimensions()?;
    let data: Vec<T> = decoded_to_vec(decoder.read_image()?)?;
    let arr = Array2::from_shape_vec((height as usize, width as usize), data)?;

    let nd_str = decoder
        .get_tag_ascii_string(Tag::GdalNodata)
        .map_err(|_| Error::MissingTag("GDAL_NODATA"))?;
    let nd: T = nd_str
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .parse::<f64>()
        .ok()
        .and_then(num::cast)
        .ok_or(Error::SampleCast)?;

    let scale = decoder
        .get_tag_f64_vec(Tag::ModelPixelScaleTag)
        .map_err(|_| Error::MissingTag("ModelPixelScale"))?;
    let tie = decoder
        .get_tag_f64_vec(Tag::ModelTiepointTag)
        .map_err(|_| Error::MissingTag("ModelTiepoint"))?;
    if scale.len() < 2 || tie.len() < 6 {
        return Err(Error::MissingTag("ModelTiepoint"));
    }
    let geo = [
        tie[3] - tie[0] * scale[0],
        scale[0],
        0.0,
        tie[4] + tie[1] * scale[1],
        0.0,
        -scale[1],
    ];

    let gdir = decoder
        .get_tag_u64_vec(Tag::GeoKeyDirectoryTag)
        .unwrap_or_default();
    let crs = crs_from_geokeys(&gdir);
    let proj = match decoder.get_tag_ascii_string(Tag::GeoAsciiParamsTag) {
        Ok(p) => p.trim_end_matches('\0').to_string(),
        Err(_) => {
            log::warn!("{} has no GeoAsciiParams tag", fname.display());
            String::new()
        }
    };

    Ok((arr, nd, crs, geo, gdir, proj))
}

/// Writes `data` as a single band GeoTIFF.
///
/// `geo` is a GDAL style geotransform (north up, so `geo[2]` and `geo[4]` are
/// ignored), `gdir` the GeoKey directory and `proj` the GeoASCII parameters, as
/// returned by [`rasterfile_to_array`].
pub fn array_to_rasterfile<T>(
    data: &Array2<T>, nd: T, geo: &[f64; 6], gdir: &[u64], proj: &str, ofn: &Path
) -> Result<()>
where
    T: RasterSample,
    [T]: TiffValue,
{
    log::debug!("Writing raster {}", ofn.display());
    let keys = gdir
        .iter()
        .map(|&k| u16::try_from(k).map_err(|_| Error::GeoKey(k)))
        .collect::<Result<Vec<u16>>>()?;

    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(ofn)?))?;
    let (rows, cols) = data.dim();
    let mut image = encoder.new_image::<T::Colour>(cols as u32, rows as u32)?;

    image
        .encoder()
        .write_tag(Tag::ModelPixelScaleTag, &[geo[1], geo[5].abs(), 0.0][..])?;
    image
        .encoder()
        .write_tag(Tag::ModelTiepointTag, &[0.0, 0.0, 0.0, geo[0], geo[3], 0.0][..])?;
    if !keys.is_empty() {
        image.encoder().write_tag(Tag::GeoKeyDirectoryTag, &keys[..])?;
    }
    if !proj.is_empty() {
        image.encoder().write_tag(Tag::GeoAsciiParamsTag, proj)?;
    }
    image
        .encoder()
        .write_tag(Tag::GdalNodata, nd.to_string().as_str())?;

    let samples: Vec<T> = data.iter().copied().collect();
    image.write_data(&samples)?;

    Ok(())
}
