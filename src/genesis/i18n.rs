//! 表示文字列 (en / zh)。
//!
//! 生成器の名前と説明はロケールごとの表を引き、見つからなければカタログの
//! 英語表記に戻す。

use super::catalog::GeneratorDef;
use super::state::Locale;

pub struct Strings {
    pub app_title: &'static str,
    pub version: &'static str,
    pub big_crunch: &'static str,
    pub big_crunch_confirm: &'static str,
    pub cancel: &'static str,
    pub confirm_reset: &'static str,
    pub footer_quote: &'static str,
    pub target_label: &'static str,
    pub target_name: &'static str,
    pub click_instruction: &'static str,
    pub total_matter: &'static str,
    pub efficiency: &'static str,
    pub matter_per_sec: &'static str,
    pub upgrade_title: &'static str,
    pub cost: &'static str,
    pub owned: &'static str,
    pub click_power: &'static str,
    /// `(id, name, description)`
    generators: &'static [(&'static str, &'static str, &'static str)],
}

static EN: Strings = Strings {
    app_title: "COSMIC GENESIS",
    version: "Version 1.0.0 // Simulation Active",
    big_crunch: "Big Crunch (Reset)",
    big_crunch_confirm: "Are you sure you want to trigger a Big Crunch? All progress will be lost.",
    cancel: "Cancel",
    confirm_reset: "Confirm Reset",
    footer_quote: "\"In the beginning, there was nothing. Then, you clicked.\"",
    target_label: "Target",
    target_name: "Unstable Singularity",
    click_instruction: "Click to harvest Matter",
    total_matter: "Total Matter",
    efficiency: "running efficiency: 100%",
    matter_per_sec: "matter / sec",
    upgrade_title: "Cosmic Fabrication",
    cost: "Cost",
    owned: "Owned",
    click_power: "per click",
    // Catalog text is English; no overrides needed.
    generators: &[],
};

static ZH: Strings = Strings {
    app_title: "宇宙创世纪",
    version: "版本 1.0.0 // 模拟运行中",
    big_crunch: "大坍缩 (重置)",
    big_crunch_confirm: "确定要触发大坍缩吗？所有进度将丢失。",
    cancel: "取消",
    confirm_reset: "确认重置",
    footer_quote: "“起初是一片虚无，直到你按下了鼠标。”",
    target_label: "目标",
    target_name: "不稳定的奇点",
    click_instruction: "点击采集物质",
    total_matter: "物质总量",
    efficiency: "运行效率: 100%",
    matter_per_sec: "物质 / 秒",
    upgrade_title: "宇宙构造",
    cost: "花费",
    owned: "拥有",
    click_power: "每次点击",
    generators: &[
        ("stardust_collector", "星尘收集器", "自动无人机，负责收集微量的宇宙尘埃。"),
        ("asteroid_miner", "小行星矿机", "从太空岩石中提取重金属的钻探设备。"),
        ("nebula_condenser", "星云凝缩器", "将气体云压缩成有形的物质。"),
        ("star_forge", "恒星熔炉", "通过创造恒星来收集聚变副产物的巨型结构。"),
        ("black_hole_siphon", "黑洞汲取器", "从奇点的事件视界中提取物质。"),
        ("galactic_engine", "星系引擎", "推动整个星系碰撞并收割产生的残骸。"),
    ],
};

pub fn strings(locale: Locale) -> &'static Strings {
    match locale {
        Locale::En => &EN,
        Locale::Zh => &ZH,
    }
}

impl Strings {
    pub fn generator_name(&self, def: &GeneratorDef) -> &'static str {
        self.lookup(def.id).map(|(name, _)| name).unwrap_or(def.name)
    }

    pub fn generator_description(&self, def: &GeneratorDef) -> &'static str {
        self.lookup(def.id)
            .map(|(_, desc)| desc)
            .unwrap_or(def.description)
    }

    fn lookup(&self, id: &str) -> Option<(&'static str, &'static str)> {
        self.generators
            .iter()
            .find(|(gid, _, _)| *gid == id)
            .map(|&(_, name, desc)| (name, desc))
    }
}
