use crate::error::{CoreError, Result};
use crate::model::{BuildArg, ImageSpec};

/// 全イメージを指すターゲット名
pub const ALL_TARGET: &str = "all";

/// GPU ランタイム（CUDA）をイメージに含めるかどうか
const USE_GPU: BuildArg = BuildArg::new("USE_GPU", "USE_GPU", "false");

/// 組み込みのイメージ定義（ビルド順）
const BUILTIN_IMAGES: &[ImageSpec] = &[
    ImageSpec {
        name: "openrouter",
        dockerfile: "components/LM/OpenRouter/Dockerfile",
        context: "components/LM/OpenRouter",
        build_args: &[],
    },
    ImageSpec {
        name: "whisper",
        dockerfile: "components/Editor/Whisper/Dockerfile",
        context: "components/Editor/Whisper",
        build_args: &[USE_GPU],
    },
    ImageSpec {
        name: "chatterbox",
        dockerfile: "components/TTS/Chatterbox/Dockerfile",
        context: "components/TTS/Chatterbox",
        build_args: &[USE_GPU],
    },
    ImageSpec {
        name: "openvoice",
        dockerfile: "components/TTS/OpenVoice/Dockerfile",
        context: "components/TTS/OpenVoice",
        build_args: &[USE_GPU],
    },
    ImageSpec {
        name: "spanishf5",
        dockerfile: "components/TTS/SpanishF5/Dockerfile",
        context: "components/TTS/SpanishF5",
        build_args: &[USE_GPU],
    },
];

/// ビルド対象の指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    All,
    Image(String),
}

impl Target {
    /// 位置引数からターゲットを決定
    ///
    /// 省略時、または `all` の場合は全イメージが対象になります。
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => Target::All,
            Some(name) if name == ALL_TARGET => Target::All,
            Some(name) => Target::Image(name.to_string()),
        }
    }
}

/// 既知のイメージの固定テーブル
#[derive(Debug, Clone, Copy)]
pub struct ImageCatalog {
    images: &'static [ImageSpec],
}

impl ImageCatalog {
    pub const fn new(images: &'static [ImageSpec]) -> Self {
        Self { images }
    }

    pub const fn builtin() -> Self {
        Self::new(BUILTIN_IMAGES)
    }

    pub fn get(&self, name: &str) -> Option<&'static ImageSpec> {
        self.images.iter().find(|image| image.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static ImageSpec> {
        self.images.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.images.iter().map(|i| i.name.to_string()).collect()
    }

    /// ターゲットに該当するイメージをビルド順で返す
    pub fn select(&self, target: &Target) -> Result<Vec<&'static ImageSpec>> {
        match target {
            Target::All => Ok(self.images.iter().collect()),
            Target::Image(name) => self
                .get(name)
                .map(|image| vec![image])
                .ok_or_else(|| CoreError::UnknownImage {
                    name: name.clone(),
                    known: self.names(),
                }),
        }
    }
}

impl Default for ImageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
