use std::fmt;

/// Handle to an image held by an [`ImageStore`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ImageId(pub(crate) usize);

/// Straight-alpha sRGB RGBA8 pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 { 1.0 } else { self.width as f32 / self.height as f32 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    Empty,
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Empty => write!(f, "image has zero width or height"),
            ImageError::SizeMismatch { expected, actual } => {
                write!(f, "image buffer holds {actual} bytes, expected {expected}")
            }
        }
    }
}

impl std::error::Error for ImageError {}

/// Append-only collection of decoded images.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: Vec<ImageData>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, width: u32, height: u32, rgba: Vec<u8>) -> Result<ImageId, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::Empty);
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ImageError::SizeMismatch { expected, actual: rgba.len() });
        }
        let id = ImageId(self.images.len());
        self.images.push(ImageData { width, height, rgba });
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: ImageId) -> Option<&ImageData> {
        self.images.get(id.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_hands_out_sequential_ids() {
        let mut store = ImageStore::new();
        let a = store.insert(1, 1, vec![0; 4]).unwrap();
        let b = store.insert(2, 1, vec![0; 8]).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.get(b).map(|img| img.width), Some(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn insert_rejects_bad_buffers() {
        let mut store = ImageStore::new();
        assert_eq!(store.insert(0, 4, vec![]), Err(ImageError::Empty));
        assert_eq!(
            store.insert(2, 2, vec![0; 12]),
            Err(ImageError::SizeMismatch { expected: 16, actual: 12 })
        );
        assert!(store.is_empty());
    }

    #[test]
    fn aspect_of_landscape_image() {
        let img = ImageData { width: 400, height: 200, rgba: vec![] };
        assert_eq!(img.aspect(), 2.0);
    }
}
