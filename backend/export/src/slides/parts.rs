//! XML bodies for every part of a deck.

use super::xml_escape;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CT_BASE: &str = "application/vnd.openxmlformats-officedocument.presentationml";

pub(crate) const CONTENT_TYPES: &str = "[Content_Types].xml";
pub(crate) const ROOT_RELS: &str = "_rels/.rels";
pub(crate) const CORE_PROPS: &str = "docProps/core.xml";
pub(crate) const APP_PROPS: &str = "docProps/app.xml";
pub(crate) const PRESENTATION: &str = "ppt/presentation.xml";
pub(crate) const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";
pub(crate) const PRES_PROPS: &str = "ppt/presProps.xml";
pub(crate) const TABLE_STYLES: &str = "ppt/tableStyles.xml";
pub(crate) const SLIDE_MASTER: &str = "ppt/slideMasters/slideMaster1.xml";
pub(crate) const SLIDE_MASTER_RELS: &str = "ppt/slideMasters/_rels/slideMaster1.xml.rels";
pub(crate) const SLIDE_LAYOUT: &str = "ppt/slideLayouts/slideLayout1.xml";
pub(crate) const SLIDE_LAYOUT_RELS: &str = "ppt/slideLayouts/_rels/slideLayout1.xml.rels";
pub(crate) const THEME: &str = "ppt/theme/theme1.xml";

/// 4:3 slide, 10in x 7.5in in EMU.
const SLIDE_CX: u64 = 9_144_000;
const SLIDE_CY: u64 = 6_858_000;

/// Relationship ids in `presentation.xml.rels` before the first slide.
const FIXED_PRESENTATION_RELS: usize = 4;
const FIRST_SLIDE_ID: usize = 256;

pub(crate) fn slide_part(index: usize) -> String {
    format!("ppt/slides/slide{}.xml", index + 1)
}

pub(crate) fn slide_rels_part(index: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", index + 1)
}

fn slide_rel_id(index: usize) -> String {
    format!("rId{}", FIXED_PRESENTATION_RELS + index + 1)
}

fn relationships(entries: &[(&str, String, &str)]) -> String {
    let mut xml = format!(r#"{XML_DECL}<Relationships xmlns="{NS_RELS}">"#);
    for (id, rel_type, target) in entries {
        xml.push_str(&format!(
            r#"<Relationship Id="{id}" Type="{rel_type}" Target="{target}"/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn rel_type(name: &str) -> String {
    format!("{REL_BASE}/{name}")
}

pub(crate) fn content_types(slide_count: usize) -> String {
    let mut xml = format!(
        concat!(
            r#"{decl}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/ppt/presentation.xml" ContentType="{ct}.presentation.main+xml"/>"#,
            r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="{ct}.slideMaster+xml"/>"#,
            r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="{ct}.slideLayout+xml"/>"#,
            r#"<Override PartName="/ppt/presProps.xml" ContentType="{ct}.presProps+xml"/>"#,
            r#"<Override PartName="/ppt/tableStyles.xml" ContentType="{ct}.tableStyles+xml"/>"#,
            r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#,
            r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
            r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#,
        ),
        decl = XML_DECL,
        ct = CT_BASE,
    );
    for index in 0..slide_count {
        xml.push_str(&format!(
            r#"<Override PartName="/{}" ContentType="{CT_BASE}.slide+xml"/>"#,
            slide_part(index)
        ));
    }
    xml.push_str("</Types>");
    xml
}

pub(crate) fn root_rels() -> String {
    relationships(&[
        ("rId1", rel_type("officeDocument"), PRESENTATION),
        (
            "rId2",
            "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties"
                .to_string(),
            CORE_PROPS,
        ),
        ("rId3", rel_type("extended-properties"), APP_PROPS),
    ])
}

pub(crate) fn core_props(title: &str, timestamp: &str) -> String {
    format!(
        concat!(
            "{decl}",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{title}</dc:title><dc:creator>docsmith</dc:creator>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{ts}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{ts}</dcterms:modified>"#,
            "</cp:coreProperties>"
        ),
        decl = XML_DECL,
        title = xml_escape(title),
        ts = timestamp,
    )
}

pub(crate) fn app_props(slide_count: usize) -> String {
    format!(
        concat!(
            "{decl}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<Application>docsmith</Application><Slides>{count}</Slides></Properties>"
        ),
        decl = XML_DECL,
        count = slide_count,
    )
}

pub(crate) fn presentation(slide_count: usize) -> String {
    let mut xml = format!(
        concat!(
            r#"{decl}<p:presentation xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" saveSubsetFonts="1">"#,
            r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#,
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
    );
    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for index in 0..slide_count {
            xml.push_str(&format!(
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID + index,
                slide_rel_id(index)
            ));
        }
        xml.push_str("</p:sldIdLst>");
    }
    xml.push_str(&format!(
        r#"<p:sldSz cx="{SLIDE_CX}" cy="{SLIDE_CY}" type="screen4x3"/><p:notesSz cx="{SLIDE_CY}" cy="{SLIDE_CX}"/></p:presentation>"#
    ));
    xml
}

pub(crate) fn presentation_rels(slide_count: usize) -> String {
    let mut entries = vec![
        ("rId1".to_string(), rel_type("slideMaster"), "slideMasters/slideMaster1.xml".to_string()),
        ("rId2".to_string(), rel_type("theme"), "theme/theme1.xml".to_string()),
        ("rId3".to_string(), rel_type("presProps"), "presProps.xml".to_string()),
        ("rId4".to_string(), rel_type("tableStyles"), "tableStyles.xml".to_string()),
    ];
    for index in 0..slide_count {
        entries.push((
            slide_rel_id(index),
            rel_type("slide"),
            format!("slides/slide{}.xml", index + 1),
        ));
    }
    let borrowed: Vec<(&str, String, &str)> = entries
        .iter()
        .map(|(id, ty, target)| (id.as_str(), ty.clone(), target.as_str()))
        .collect();
    relationships(&borrowed)
}

pub(crate) fn pres_props() -> String {
    format!(r#"{XML_DECL}<p:presentationPr xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"/>"#)
}

pub(crate) fn table_styles() -> String {
    format!(
        r#"{XML_DECL}<a:tblStyleLst xmlns:a="{NS_A}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    )
}

fn group_shape_properties() -> &'static str {
    concat!(
        r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
        r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
        r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    )
}

/// A placeholder shape. `geometry` is `(x, y, cx, cy)` for the master; layouts
/// and slides inherit it.
fn placeholder(id: u32, name: &str, ph: &str, geometry: Option<(u64, u64, u64, u64)>, body: &str) -> String {
    let sp_pr = match geometry {
        Some((x, y, cx, cy)) => format!(
            r#"<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#
        ),
        None => "<p:spPr/>".to_string(),
    };
    format!(
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/>"#,
            r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{ph}</p:nvPr></p:nvSpPr>"#,
            "{sp_pr}<p:txBody><a:bodyPr/><a:lstStyle/>{body}</p:txBody></p:sp>"
        ),
        id = id,
        name = name,
        ph = ph,
        sp_pr = sp_pr,
        body = body,
    )
}

const TITLE_PH: &str = r#"<p:ph type="title"/>"#;
const BODY_PH_MASTER: &str = r#"<p:ph type="body" idx="1"/>"#;
const BODY_PH: &str = r#"<p:ph idx="1"/>"#;
const EMPTY_PARAGRAPH: &str = r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#;

pub(crate) fn slide_master() -> String {
    let tree = format!(
        "{}{}{}",
        group_shape_properties(),
        placeholder(2, "Title Placeholder 1", TITLE_PH, Some((457_200, 274_638, 8_229_600, 1_143_000)), EMPTY_PARAGRAPH),
        placeholder(3, "Text Placeholder 2", BODY_PH_MASTER, Some((457_200, 1_600_200, 8_229_600, 4_525_963)), EMPTY_PARAGRAPH),
    );
    format!(
        concat!(
            r#"{decl}<p:sldMaster xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            "<p:cSld><p:spTree>{tree}</p:spTree></p:cSld>",
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
            r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            "<p:txStyles>",
            r#"<p:titleStyle><a:lvl1pPr algn="ctr"><a:buNone/><a:defRPr sz="4400" kern="1200">"#,
            r#"<a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/></a:defRPr></a:lvl1pPr></p:titleStyle>"#,
            r#"<p:bodyStyle><a:lvl1pPr marL="342900" indent="-342900" algn="l"><a:spcBef><a:spcPct val="20000"/></a:spcBef>"#,
            r#"<a:buFont typeface="Arial"/><a:buChar char="•"/><a:defRPr sz="3200" kern="1200">"#,
            r#"<a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr></p:bodyStyle>"#,
            r#"<p:otherStyle><a:defPPr><a:defRPr lang="en-US"/></a:defPPr></p:otherStyle>"#,
            "</p:txStyles></p:sldMaster>"
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        tree = tree,
    )
}

pub(crate) fn slide_master_rels() -> String {
    relationships(&[
        ("rId1", rel_type("slideLayout"), "../slideLayouts/slideLayout1.xml"),
        ("rId2", rel_type("theme"), "../theme/theme1.xml"),
    ])
}

pub(crate) fn slide_layout() -> String {
    let tree = format!(
        "{}{}{}",
        group_shape_properties(),
        placeholder(2, "Title 1", TITLE_PH, None, EMPTY_PARAGRAPH),
        placeholder(3, "Content Placeholder 2", BODY_PH, None, EMPTY_PARAGRAPH),
    );
    format!(
        concat!(
            r#"{decl}<p:sldLayout xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" type="obj" preserve="1">"#,
            r#"<p:cSld name="Title and Content"><p:spTree>{tree}</p:spTree></p:cSld>"#,
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        tree = tree,
    )
}

pub(crate) fn slide_layout_rels() -> String {
    relationships(&[("rId1", rel_type("slideMaster"), "../slideMasters/slideMaster1.xml")])
}

fn text_paragraph(text: &str) -> String {
    format!(
        r#"<a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
        xml_escape(text)
    )
}

/// A slide with the title in the title placeholder and one paragraph per bullet
/// in the body placeholder.
pub(crate) fn slide(title: &str, bullets: &[String]) -> String {
    let body = if bullets.is_empty() {
        EMPTY_PARAGRAPH.to_string()
    } else {
        bullets.iter().map(|b| text_paragraph(b)).collect()
    };
    let tree = format!(
        "{}{}{}",
        group_shape_properties(),
        placeholder(2, "Title 1", TITLE_PH, None, &text_paragraph(title)),
        placeholder(3, "Content Placeholder 2", BODY_PH, None, &body),
    );
    format!(
        concat!(
            r#"{decl}<p:sld xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            "<p:cSld><p:spTree>{tree}</p:spTree></p:cSld>",
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        tree = tree,
    )
}

pub(crate) fn slide_rels() -> String {
    relationships(&[("rId1", rel_type("slideLayout"), "../slideLayouts/slideLayout1.xml")])
}

pub(crate) fn theme() -> String {
    let fills = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#.repeat(3);
    let lines: String = [9525, 25400, 38100]
        .iter()
        .map(|w| format!(r#"<a:ln w="{w}"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#))
        .collect();
    let effects = "<a:effectStyle><a:effectLst/></a:effectStyle>".repeat(3);
    format!(
        concat!(
            r#"{decl}<a:theme xmlns:a="{a}" name="Office Theme"><a:themeElements>"#,
            r#"<a:clrScheme name="Office">"#,
            r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#,
            r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
            r#"<a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2>"#,
            r#"<a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2>"#,
            r#"<a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4>"#,
            r#"<a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6>"#,
            r#"<a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink>"#,
            "</a:clrScheme>",
            r#"<a:fontScheme name="Office">"#,
            r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
            "</a:fontScheme>",
            r#"<a:fmtScheme name="Office">"#,
            "<a:fillStyleLst>{fills}</a:fillStyleLst>",
            "<a:lnStyleLst>{lines}</a:lnStyleLst>",
            "<a:effectStyleLst>{effects}</a:effectStyleLst>",
            "<a:bgFillStyleLst>{fills}</a:bgFillStyleLst>",
            "</a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"
        ),
        decl = XML_DECL,
        a = NS_A,
        fills = fills,
        lines = lines,
        effects = effects,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_lists_every_slide() {
        let xml = presentation(3);
        assert_eq!(xml.matches("<p:sldId ").count(), 3);
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId5"/>"#));
        assert!(xml.contains(r#"<p:sldId id="258" r:id="rId7"/>"#));

        let rels = presentation_rels(3);
        assert!(rels.contains(r#"Id="rId7""#));
        assert!(rels.contains(r#"Target="slides/slide3.xml""#));
    }

    #[test]
    fn test_empty_deck_omits_slide_list() {
        assert!(!presentation(0).contains("sldIdLst"));
        assert!(!content_types(0).contains("/ppt/slides/"));
    }

    #[test]
    fn test_slide_escapes_text() {
        let xml = slide("Q&A", &["a < b".to_string()]);
        assert!(xml.contains("<a:t>Q&amp;A</a:t>"));
        assert!(xml.contains("<a:t>a &lt; b</a:t>"));
    }

    #[test]
    fn test_slide_without_bullets_has_empty_body_paragraph() {
        let xml = slide("Only a title", &[]);
        assert!(xml.contains(EMPTY_PARAGRAPH));
        assert_eq!(xml.matches("<a:t>").count(), 1);
    }
}
