//! 内置引擎的滤镜表.

use avbind_core::MediaType;

use crate::filter::{FilterDescriptor as Desc, FilterFlags, FilterPad};
use crate::registry::StaticFilterCatalog;

const VIDEO: &[FilterPad] = &[FilterPad::new("default", MediaType::Video)];
const AUDIO: &[FilterPad] = &[FilterPad::new("default", MediaType::Audio)];
const NONE: &[FilterPad] = &[];

const F: FilterFlags = FilterFlags::empty();

static FILTERS: [Desc; 26] = [
    // ========================
    // 源与汇
    // ========================
    Desc {
        name: "buffer",
        description: "Buffer video frames, and make them accessible to the filterchain.",
        inputs: NONE,
        outputs: VIDEO,
        flags: F,
    },
    Desc {
        name: "abuffer",
        description: "Buffer audio frames, and make them accessible to the filterchain.",
        inputs: NONE,
        outputs: AUDIO,
        flags: F,
    },
    Desc {
        name: "buffersink",
        description: "Buffer video frames, and make them available to the end of the filter graph.",
        inputs: VIDEO,
        outputs: NONE,
        flags: F,
    },
    Desc {
        name: "abuffersink",
        description: "Buffer audio frames, and make them available to the end of the filter graph.",
        inputs: AUDIO,
        outputs: NONE,
        flags: F,
    },
    Desc {
        name: "nullsink",
        description: "Do absolutely nothing with the input video.",
        inputs: VIDEO,
        outputs: NONE,
        flags: F,
    },
    Desc {
        name: "anullsink",
        description: "Do absolutely nothing with the input audio.",
        inputs: AUDIO,
        outputs: NONE,
        flags: F,
    },
    Desc {
        name: "color",
        description: "Provide an uniformly colored input.",
        inputs: NONE,
        outputs: VIDEO,
        flags: F,
    },
    Desc {
        name: "testsrc",
        description: "Generate test pattern.",
        inputs: NONE,
        outputs: VIDEO,
        flags: F,
    },
    Desc {
        name: "anullsrc",
        description: "Null audio source, return empty audio frames.",
        inputs: NONE,
        outputs: AUDIO,
        flags: F,
    },
    // ========================
    // 视频
    // ========================
    Desc {
        name: "null",
        description: "Pass the source unchanged to the output.",
        inputs: VIDEO,
        outputs: VIDEO,
        flags: FilterFlags::METADATA_ONLY,
    },
    Desc {
        name: "scale",
        description: "Scale the input video size and/or convert the image format.",
        inputs: VIDEO,
        outputs: VIDEO,
        flags: F,
    },
    Desc {
        name: "format",
        description: "Convert the input video to one of the specified pixel formats.",
        inputs: VIDEO,
        outputs: VIDEO,
        flags: FilterFlags::METADATA_ONLY,
    },
    Desc {
        name: "fps",
        description: "Force constant framerate.",
        inputs: VIDEO,
        outputs: VIDEO,
        flags: F,
    },
    Desc {
        name: "crop",
        description: "Crop the input video.",
        inputs: VIDEO,
        outputs: VIDEO,
        flags: FilterFlags::METADATA_ONLY,
    },
    Desc {
        name: "pad",
        description: "Pad the input video.",
        inputs: VIDEO,
        outputs: VIDEO,
        flags: F,
    },
    Desc {
        name: "overlay",
        description: "Overlay a video source on top of the input.",
        inputs: &[
            FilterPad::new("main", MediaType::Video),
            FilterPad::new("overlay", MediaType::Video),
        ],
        outputs: VIDEO,
        flags: FilterFlags::SUPPORT_TIMELINE_INTERNAL.union(FilterFlags::SLICE_THREADS),
    },
    Desc {
        name: "split",
        description: "Pass on the input to N video outputs.",
        inputs: VIDEO,
        outputs: NONE,
        flags: FilterFlags::DYNAMIC_OUTPUTS.union(FilterFlags::METADATA_ONLY),
    },
    Desc {
        name: "showinfo",
        description: "Show textual information for each video frame.",
        inputs: VIDEO,
        outputs: VIDEO,
        flags: FilterFlags::METADATA_ONLY,
    },
    Desc {
        name: "hwupload",
        description: "Upload a normal frame to a hardware frame",
        inputs: VIDEO,
        outputs: VIDEO,
        flags: FilterFlags::HWDEVICE,
    },
    Desc {
        name: "hflip",
        description: "Horizontally flip the input video.",
        inputs: VIDEO,
        outputs: VIDEO,
        flags: FilterFlags::SUPPORT_TIMELINE_GENERIC.union(FilterFlags::SLICE_THREADS),
    },
    // ========================
    // 音频
    // ========================
    Desc {
        name: "anull",
        description: "Pass the source unchanged to the output.",
        inputs: AUDIO,
        outputs: AUDIO,
        flags: FilterFlags::METADATA_ONLY,
    },
    Desc {
        name: "volume",
        description: "Change input volume.",
        inputs: AUDIO,
        outputs: AUDIO,
        flags: FilterFlags::SUPPORT_TIMELINE_INTERNAL,
    },
    Desc {
        name: "aresample",
        description: "Resample audio data.",
        inputs: AUDIO,
        outputs: AUDIO,
        flags: F,
    },
    Desc {
        name: "asplit",
        description: "Pass on the audio input to N audio outputs.",
        inputs: AUDIO,
        outputs: NONE,
        flags: FilterFlags::DYNAMIC_OUTPUTS.union(FilterFlags::METADATA_ONLY),
    },
    Desc {
        name: "amix",
        description: "Audio mixing.",
        inputs: NONE,
        outputs: AUDIO,
        flags: FilterFlags::DYNAMIC_INPUTS,
    },
    // ========================
    // 多媒体
    // ========================
    Desc {
        name: "concat",
        description: "Concatenate audio and video streams.",
        inputs: NONE,
        outputs: NONE,
        flags: FilterFlags::DYNAMIC_INPUTS.union(FilterFlags::DYNAMIC_OUTPUTS),
    },
];

static CATALOG: StaticFilterCatalog = StaticFilterCatalog::new(&FILTERS);

/// 内置引擎的滤镜注册表
pub fn builtin_filters() -> &'static StaticFilterCatalog {
    &CATALOG
}
