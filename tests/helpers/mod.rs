// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供集成测试共用的目录、房间与请求构建
// ==========================================

#![allow(dead_code)]

use av_boq_engine::domain::types::{BudgetTier, RoomType};
use av_boq_engine::domain::{Catalog, RoomSpecification};
use av_boq_engine::engine::GenerationRequest;
use av_boq_engine::importer::CatalogLoader;
use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};

/// 覆盖小型/大型房间全部模板的样例目录
pub const CATALOG_CSV: &str = "\
Product Name,Brand,Model,Category,Sub-Category,Price (USD),Description,Size,Power
Samsung QM55C,Samsung,LH55QMCEBGCXGO,Displays,Professional Display,$1200,4K UHD commercial display,55,150W
Samsung QM65C,Samsung,LH65QMCEBGCXGO,Displays,Professional Display,$1800,4K UHD commercial display,65,190W
Samsung QM75C,Samsung,LH75QMCEBGCXGO,Displays,Professional Display,$2600,4K UHD commercial display,75,240W
Samsung QM85C,Samsung,LH85QMCEBGCXGO,Displays,Professional Display,$4200,4K UHD commercial display,85,310W
LG 86UH5J,LG,86UH5J-H,Displays,Professional Display,$3900,4K UHD signage display,86,300W
Samsung QM98C,Samsung,LH98QMCEBGCXGO,Displays,Professional Display,$9000,4K UHD commercial display,98,450W
Chief LTM1U,Chief,LTM1U,Mounts,Display Mount,$350,Large tilt wall mount,,
Chief XSM1U,Chief,XSM1U,Mounts,Display Mount,$500,Extra large fusion wall mount,,
Logitech Rally Bar,Logitech,960-001308,Video Conferencing,Video Bar,$3999,All-in-one video bar with beamforming microphones,,
Poly Studio X50,Poly,2200-85970-001,Video Conferencing,Video Bar,$3500,Video bar with built-in speakers,,
Rally Bar 3 Year Extended Warranty,Logitech,994-000152,Video Conferencing,Video Bar,$600,,,
Cisco Room Kit Pro,Cisco,CS-KITPRO-K9,Video Conferencing,Video Codec,$15000,Room kit codec for large rooms,,
Poly G7500,Poly,7200-85740-001,Video Conferencing,Video Codec,$7000,Room system codec,,
Poly EagleEye IV 12x,Poly,7230-85630-001,Video Conferencing,PTZ Camera,$2500,PTZ camera with 12x zoom,,
Cisco PTZ 4K Camera,Cisco,CS-CAM-PTZ4K,Video Conferencing,PTZ Camera,$4500,PTZ camera with tracking,,
Logitech Tap,Logitech,939-001950,Control Systems,Touch Controller,$999,Meeting room touch controller,,
Crestron CP4N,Crestron,CP4N,Control Systems,Control Processor,$2000,Control processor for room automation,,
Crestron TSW-1070,Crestron,TSW-1070-B-S,Control Systems,Touch Panel,$2200,10 inch touch panel,,
Shure MXA310,Shure,MXA310W-A,Audio,Table Microphone,$2800,Table array microphone,,
JBL Control 24CT,JBL,CONTROL 24CT,Audio,Ceiling Speaker,$250,Ceiling speaker 70V,,
QSC AD-C6T,QSC,AD-C6T,Audio,Ceiling Speaker,$200,Ceiling speaker 6.5in,,
Biamp TesiraFORTE AI,Biamp,TESIRAFORTE AI,Audio,DSP,$4000,DSP with AEC,,
QSC Core 110f,QSC,CORE 110F,Audio,DSP,$5000,Q-SYS processor with AEC,,
Shure MXA920,Shure,MXA920W-S,Audio,Ceiling Microphone,$5500,Ceiling array microphone,,
Biamp Parle TCM-XA,Biamp,TCM-XA,Audio,Ceiling Microphone,$3000,Ceiling microphone array,,
QSC SPA4-100,QSC,SPA4-100,Audio,Amplifier,$900,4-channel amplifier,,400W
Crown DCi 8|600N,Crown,DCI8600N,Audio,Amplifier,$3000,8-channel network amplifier,,4800W
Shure ULXD24,Shure,ULXD24/SM58,Audio,Wireless Microphone,$1500,Wireless handheld microphone,,
Listen Technologies LS-55,Listen Technologies,LS-55-072,Audio,Assistive Listening,$2500,Assistive listening system,,
Williams AV PLR BP1,Williams AV,PLR BP1,Audio,Hearing Loop,$1800,Hearing loop driver,,
Extron IN1608,Extron,60-1393-01,Signal Management,Presentation Switcher,$3500,Presentation switcher with scaler,,
Barco ClickShare CX-50,Barco,R9861522NA,Signal Management,Wireless Presentation,$1800,Wireless presentation system,,
Epiphan Pearl Nano,Epiphan,ESP1412,Signal Management,Recorder,$2500,Recorder and streaming capture,,
Extron Cable Cubby 600,Extron,60-1292-01,Cables & Connectivity,Table Connectivity,$400,Table connectivity box,,
Kramer C-HM/HM-10,Kramer,C-HM/HM-10,Cables & Connectivity,AV Cable,$30,HDMI cable 10ft,,
Cisco CBS350-24P,Cisco,CBS350-24P-4G,Networking,Network Switch,$700,24-port managed PoE network switch,,
Middle Atlantic BGR-4227,Middle Atlantic,BGR-4227,Infrastructure,Equipment Rack,$1500,42U rack enclosure,,
Middle Atlantic PD-920R,Middle Atlantic,PD-920R,Infrastructure,Power Distribution,$400,Rackmount PDU,,
APC Smart-UPS 1500,APC,SMT1500RM2U,Infrastructure,UPS,$800,Rackmount UPS,,
Crestron Installation Service,Crestron,SVC-INSTALL,Software & Services,Installation,$1500,On-site installation,,
";

/// 将目录文本写入临时目录下的 CSV 文件
pub fn write_catalog_csv(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("catalog.csv");
    std::fs::write(&path, contents).expect("Failed to write catalog csv");
    path
}

/// 通过 CSV 导入流程加载样例目录
pub fn load_catalog() -> Catalog {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = write_catalog_csv(dir.path(), CATALOG_CSV);
    let (catalog, report) = CatalogLoader::default()
        .load_file(&path)
        .expect("Failed to load sample catalog");
    assert!(report.skipped.is_empty(), "样例目录不应有跳过行: {:?}", report.skipped);
    catalog
}

/// 固定生成时间（可复现输出）
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()
}

/// 12 x 10 ft 小型会议室（Small 档）
pub fn huddle_room() -> RoomSpecification {
    RoomSpecification::new(12.0, 10.0, 9.0, RoomType::SmallHuddle, 4, BudgetTier::Standard)
}

/// 28 x 20 ft 标准会议室（Large 档）
pub fn conference_room(budget_tier: BudgetTier) -> RoomSpecification {
    RoomSpecification::new(28.0, 20.0, 10.0, RoomType::StandardConference, 8, budget_tier)
}

pub fn request(room_label: &str, room: RoomSpecification) -> GenerationRequest {
    GenerationRequest::new("PRJ-001", room_label, room).at(fixed_time())
}
