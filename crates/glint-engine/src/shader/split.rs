use crate::device::ShaderStage;

/// Per-stage source text produced by [`split_stages`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageSources {
    pub vertex: String,
    pub fragment: String,
}

/// Splits a combined shader source into vertex and fragment stage sources.
///
/// The scan walks the text line by line keeping an active stage. A line
/// containing `#vertex` switches to the vertex stage, a line containing
/// `#fragment` switches to the fragment stage; marker lines themselves are
/// not emitted. Every other line is appended, with its original terminator,
/// to whichever stage is active. Markers may appear in any order and any
/// number of times.
///
/// The initial active stage is **fragment**: content preceding the first
/// marker lands in the fragment source. A file without markers therefore
/// yields an empty vertex source and the whole file as fragment source,
/// which then fails compilation — the expected failure path, not a special
/// case here.
pub fn split_stages(text: &str) -> StageSources {
    let mut sources = StageSources::default();
    let mut active = ShaderStage::Fragment;

    for line in text.split_inclusive('\n') {
        if line.contains("#vertex") {
            active = ShaderStage::Vertex;
            continue;
        }
        if line.contains("#fragment") {
            active = ShaderStage::Fragment;
            continue;
        }

        match active {
            ShaderStage::Vertex => sources.vertex.push_str(line),
            ShaderStage::Fragment => sources.fragment.push_str(line),
        }
    }

    sources
}
