use crate::ImageRef;

pub const GALLERY_MAX: usize = 6;

/// Prepends `image`, keeps the first occurrence of every value and caps the
/// result at [`GALLERY_MAX`] entries, most recent first.
pub fn push_image(entries: &[ImageRef], image: ImageRef) -> Vec<ImageRef> {
    let mut next = Vec::with_capacity(GALLERY_MAX);
    next.push(image);
    for entry in entries {
        if next.len() >= GALLERY_MAX {
            break;
        }
        if !next.contains(entry) {
            next.push(entry.clone());
        }
    }
    next
}

fn normalize(entries: Vec<ImageRef>) -> Vec<ImageRef> {
    let mut next: Vec<ImageRef> = Vec::with_capacity(entries.len().min(GALLERY_MAX));
    for entry in entries {
        if next.len() >= GALLERY_MAX {
            break;
        }
        if !next.contains(&entry) {
            next.push(entry);
        }
    }
    next
}

/// Recent generations, most recent first, unique and capped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gallery {
    entries: Vec<ImageRef>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a gallery from untrusted entries, dropping duplicates and
    /// anything past the cap.
    pub fn from_entries(entries: Vec<ImageRef>) -> Self {
        Self {
            entries: normalize(entries),
        }
    }

    pub fn push(&mut self, image: ImageRef) {
        self.entries = push_image(&self.entries, image);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ImageRef] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&ImageRef> {
        self.entries.first()
    }

    pub fn contains(&self, image: &ImageRef) -> bool {
        self.entries.contains(image)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
